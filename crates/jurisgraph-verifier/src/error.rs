//! Verifier error types

use jurisgraph_checker::CheckerError;
use jurisgraph_quality::QualityError;
use thiserror::Error;

/// Errors surfaced by the verification pipeline
///
/// Degraded conditions (no claims, graph down, log write failure) are not
/// errors; they travel in `VerificationOutcome::conditions`.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Cancelled under a discard policy
    #[error("Verification cancelled")]
    Cancelled,

    /// The quality log could not be read
    #[error(transparent)]
    Quality(#[from] QualityError),

    /// The analyst or reviewer call failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<CheckerError> for VerifyError {
    fn from(e: CheckerError) -> Self {
        match e {
            CheckerError::Cancelled => VerifyError::Cancelled,
            CheckerError::Config(msg) => VerifyError::Config(msg),
        }
    }
}
