//! Quality log configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how quality records are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// JSONL file receiving one record per verification
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Record verifications at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("logs/quality_log.jsonl")
}

fn default_enabled() -> bool {
    true
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            enabled: default_enabled(),
        }
    }
}

impl QualityConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("log_path must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}
