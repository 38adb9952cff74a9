//! Prompter State - The directive stack
//!
//! This crate implements the selection algorithm that decides which directive
//! the visitor sees:
//! - Priority-ordered insertion
//! - Equal-priority tie-break (earliest push stays active)
//! - Re-assertion relocates instead of duplicating
//! - Removal by name, by key, or of the active directive

pub mod stack;

pub use stack::*;
