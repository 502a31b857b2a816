//! JurisGraph Text Generation Providers
//!
//! Implementations of the `TextGenerator` trait from `jurisgraph-domain`,
//! used for the analyst and reviewer calls. The verification core never
//! calls these itself; it consumes the text they produce.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic responses for tests
//! - `OllamaProvider`: local Ollama API
//!
//! # Examples
//!
//! ```
//! use jurisgraph_llm::MockProvider;
//! use jurisgraph_domain::traits::TextGenerator;
//!
//! # async fn run() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod ollama;

use async_trait::async_trait;
use jurisgraph_domain::traits::TextGenerator;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use config::LlmConfig;
pub use ollama::OllamaProvider;

/// Errors that can occur during text generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// The call did not finish in time
    #[error("Generation timed out after {0} s")]
    Timeout(u64),

    /// Provider could not be built
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail,
}

/// Mock provider for deterministic testing
///
/// Rules are matched in insertion order against the prompt; the first rule
/// whose marker occurs in the prompt decides the reply.
///
/// ```
/// use jurisgraph_llm::MockProvider;
///
/// let provider = MockProvider::default()
///     .respond_when("REVIEWER", "CLAIMS: 0")
///     .fail_when("broken");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<(String, Scripted)>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a provider with a fixed response for every prompt
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reply with `response` when the prompt contains `marker`
    pub fn respond_when(self, marker: impl Into<String>, response: impl Into<String>) -> Self {
        self.push(marker.into(), Scripted::Reply(response.into()));
        self
    }

    /// Fail when the prompt contains `marker`
    pub fn fail_when(self, marker: impl Into<String>) -> Self {
        self.push(marker.into(), Scripted::Fail);
        self
    }

    fn push(&self, marker: String, scripted: Scripted) {
        if let Ok(mut rules) = self.rules.lock() {
            rules.push((marker, scripted));
        }
    }

    /// Number of `generate` calls so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl TextGenerator for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let rules = self
            .rules
            .lock()
            .map_err(|_| LlmError::Other("mock rules poisoned".to_string()))?;
        match rules.iter().find(|(marker, _)| prompt.contains(marker.as_str())) {
            Some((_, Scripted::Reply(response))) => Ok(response.clone()),
            Some((marker, Scripted::Fail)) => Err(LlmError::Other(format!("Mock error for '{}'", marker))),
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        assert_eq!(provider.generate("any prompt").await.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_rules_in_order() {
        let provider = MockProvider::default()
            .respond_when("analyst", "answer")
            .respond_when("review", "CLAIMS: 0")
            .fail_when("explode");

        assert_eq!(provider.generate("the analyst prompt").await.unwrap(), "answer");
        assert_eq!(provider.generate("please review this").await.unwrap(), "CLAIMS: 0");
        assert!(matches!(provider.generate("explode now").await, Err(LlmError::Other(_))));
        assert_eq!(provider.generate("other").await.unwrap(), "Default mock response");
        assert_eq!(provider.call_count(), 4);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let a = MockProvider::new("x");
        let b = a.clone();
        a.generate("p").await.unwrap();
        assert_eq!(b.call_count(), 1);
    }
}
