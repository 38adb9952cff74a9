//! Error types for directive catalogs

use thiserror::Error;

use crate::DirectiveId;

/// Core directive errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("Unknown directive: {0}")]
    UnknownDirective(DirectiveId),

    #[error("Duplicate directive definition: {0}")]
    DuplicateDirective(DirectiveId),

    #[error("Directive name must not be empty")]
    EmptyName,
}

/// Result type for directive operations
pub type DirectiveResult<T> = Result<T, DirectiveError>;
