//! Error types for the runtime layer

use std::io;
use std::path::PathBuf;

use prompter_core::DirectiveError;
use thiserror::Error;

/// Failure to bind a dropped file as a media layer
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Media file not readable: {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Media path is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Unsupported media format {extension:?}: {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Media rejected: {0}")]
    Rejected(String),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Directive(#[from] DirectiveError),
}

/// Result type for media binding
pub type MediaResult<T> = Result<T, MediaError>;

/// Result type for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;
