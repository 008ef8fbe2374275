//! Error Handling Module
//!
//! Defines the error types for the leafscan pipeline.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for leafscan operations
#[derive(Error, Debug)]
pub enum LeafscanError {
    /// Image path did not resolve or the file could not be decoded.
    /// A failed prediction: no partial result is produced.
    #[error("Failed to load image at '{0}': {1}")]
    ImageLoad(PathBuf, String),

    /// The classifier could not be initialized. Fatal to pipeline
    /// readiness; no predictions can be served until resolved.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Malformed or degenerate input that is not an image-load failure
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for leafscan operations
pub type Result<T> = std::result::Result<T, LeafscanError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, msg: &str) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| LeafscanError::InvalidInput(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| LeafscanError::InvalidInput(format!("{}: {}", f(), e)))
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| LeafscanError::InvalidInput(msg.to_string()))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.ok_or_else(|| LeafscanError::InvalidInput(f()))
    }
}
