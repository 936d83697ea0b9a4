//! Error types for the neuronet_io crate.

use neuronet_core::BrainError;
use thiserror::Error;

/// Main error type for persistence operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// The brain rejected loaded parameters
    #[error("Brain error: {0}")]
    Brain(#[from] BrainError),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for neuronet_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    #[must_use]
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }

    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
