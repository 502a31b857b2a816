//! Error types for the Claim Extractor

use thiserror::Error;

/// Errors that can occur while reading reviewer output
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// Reviewer output does not follow the claim grammar (MALFORMED_REVIEW)
    #[error("Malformed review: {0}")]
    MalformedReview(String),

    /// Reviewer output exceeds the configured maximum
    #[error("Review too long: {0} chars (max: {1})")]
    ReviewTooLong(usize, usize),

    /// Self-reported metrics block is not valid JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
