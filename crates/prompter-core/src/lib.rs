//! Prompter Core - Directive types and the directive catalog
//!
//! This crate defines the values every other layer works with:
//! - Identifiers (DirectiveId, DirectiveKey) and Priority
//! - The immutable Directive value
//! - The DirectiveCatalog registry
//! - Error types

pub mod id;
pub mod directive;
pub mod catalog;
pub mod error;

pub use id::*;
pub use directive::*;
pub use catalog::*;
pub use error::*;
