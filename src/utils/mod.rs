//! Utilities: error handling and logging

pub mod error;
pub mod logging;

// Re-export main types for convenience
pub use error::{LeafscanError, Result, ResultExt};
pub use logging::{init_logging, LogConfig};
