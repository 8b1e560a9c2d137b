//! Error types for meetlight.

use thiserror::Error;

/// Errors that can occur while evaluating or displaying meeting status.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event source error: {0}")]
    Provider(String),

    #[error("Display error: {0}")]
    Display(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for meetlight operations.
pub type CoreResult<T> = Result<T, CoreError>;
