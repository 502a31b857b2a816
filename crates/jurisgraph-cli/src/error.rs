//! Error types for the CLI application.

use jurisgraph_domain::traits::GraphError;
use jurisgraph_graph::SchemaError;
use jurisgraph_llm::LlmError;
use jurisgraph_quality::QualityError;
use jurisgraph_verifier::VerifyError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Graph store error
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Ingestion error
    #[error("Ingestion error: {0}")]
    Schema(#[from] SchemaError),

    /// Language model error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Quality log error
    #[error("Quality log error: {0}")]
    Quality(#[from] QualityError),

    /// Verification error
    #[error("Verification error: {0}")]
    Verify(#[from] VerifyError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
