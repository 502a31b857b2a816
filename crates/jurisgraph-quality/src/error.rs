//! Error types for quality logging

use thiserror::Error;

/// Errors that can occur while recording or reading quality data
#[derive(Error, Debug)]
pub enum QualityError {
    /// The log medium could not be written or read
    #[error("Quality log I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An entry could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The log is not accepting writes
    #[error("Quality log unavailable: {0}")]
    Unavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
