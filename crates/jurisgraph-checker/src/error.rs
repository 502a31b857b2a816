//! Checker error types

use thiserror::Error;

/// Errors that can occur while checking claims
///
/// Graph failures are not errors here: they become `CheckerVerdict::Unavailable`
/// on the claim they affected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckerError {
    /// The verification was cancelled and partial results were not wanted
    #[error("Verification cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
