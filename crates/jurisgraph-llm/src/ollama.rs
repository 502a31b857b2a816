//! Ollama provider
//!
//! Talks to a local Ollama server over HTTP, with a per-request timeout and
//! retry with exponential backoff on transport and server errors.
//!
//! # Examples
//!
//! ```no_run
//! use jurisgraph_llm::{LlmConfig, OllamaProvider};
//!
//! let provider = OllamaProvider::from_config(&LlmConfig::default()).unwrap();
//! assert_eq!(provider.model(), "llama3.1");
//! ```

use crate::config::LlmConfig;
use crate::LlmError;
use async_trait::async_trait;
use jurisgraph_domain::traits::TextGenerator;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for generation requests (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    timeout_secs: u64,
    max_retries: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a provider for `model` at `endpoint`
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::build(endpoint.into(), model.into(), DEFAULT_TIMEOUT_SECS, DEFAULT_MAX_RETRIES, 0.0)
    }

    /// Create a provider from configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Config)?;
        Self::build(
            config.endpoint.clone(),
            config.model.clone(),
            config.timeout_secs,
            config.max_retries,
            config.temperature,
        )
    }

    fn build(endpoint: String, model: String, timeout_secs: u64, max_retries: u32, temperature: f32) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            client,
            timeout_secs,
            max_retries: max_retries.max(1),
            temperature,
        })
    }

    /// Set the number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// API endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn attempt(&self, url: &str, body: &GenerateRequest<'_>) -> Result<String, (LlmError, bool)> {
        let response = match self.client.post(url).json(body).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err((LlmError::Timeout(self.timeout_secs), true)),
            Err(e) => return Err((LlmError::Communication(format!("Request failed: {}", e)), true)),
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err((LlmError::ModelNotAvailable(self.model.clone()), false));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            let retry = status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS;
            return Err((LlmError::Communication(format!("HTTP {}: {}", status, text)), retry));
        }

        response
            .json::<GenerateResponse>()
            .await
            .map(|r| r.response)
            .map_err(|e| (LlmError::InvalidResponse(format!("Failed to parse response: {}", e)), false))
    }
}

#[async_trait]
impl TextGenerator for OllamaProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt(&url, &body).await {
                Ok(text) => {
                    debug!(model = %self.model, chars = text.len(), "generation finished");
                    return Ok(text);
                }
                Err((e, retry)) if retry && attempts < self.max_retries => {
                    // 1s, 2s, 4s, ...
                    let delay = Duration::from_secs(2u64.pow(attempts - 1));
                    warn!(attempt = attempts, error = %e, "generation failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err((e, _)) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/", "llama3.1").unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:11434");
        assert_eq!(provider.model(), "llama3.1");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = LlmConfig {
            model: String::new(),
            ..LlmConfig::default()
        };
        assert!(matches!(OllamaProvider::from_config(&config), Err(LlmError::Config(_))));
    }

    #[test]
    fn test_retries_never_zero() {
        let provider = OllamaProvider::new(DEFAULT_ENDPOINT, "m").unwrap().with_max_retries(0);
        assert_eq!(provider.max_retries, 1);
    }

    #[tokio::test]
    #[ignore] // needs a running Ollama
    async fn test_generate_integration() {
        let provider = OllamaProvider::new(DEFAULT_ENDPOINT, "llama3.1").unwrap();
        let response = provider.generate("Say 'hello' and nothing else").await.unwrap();
        assert!(!response.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let provider = OllamaProvider::new("http://localhost:99999", "llama3.1")
            .unwrap()
            .with_max_retries(1);

        let result = provider.generate("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
