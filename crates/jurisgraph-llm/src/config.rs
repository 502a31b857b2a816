//! Text generation settings

use serde::{Deserialize, Serialize};

/// Settings for the Ollama provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Sampling temperature; reviewers should stay near zero
    #[serde(default)]
    pub temperature: f32,
}

fn default_endpoint() -> String {
    crate::ollama::DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_timeout_secs() -> u64 {
    crate::ollama::DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    crate::ollama::DEFAULT_MAX_RETRIES
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            temperature: 0.0,
        }
    }
}

impl LlmConfig {
    /// Apply `OLLAMA_ENDPOINT` and `JURISGRAPH_MODEL` when set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("OLLAMA_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("JURISGRAPH_MODEL") {
            self.model = model;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be > 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be > 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature {} out of range [0.0, 2.0]", self.temperature));
        }
        Ok(())
    }
}
