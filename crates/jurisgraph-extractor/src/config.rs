//! Configuration for the Claim Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Claim Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum reviewer output length (characters); longer reviews are malformed
    pub max_review_length: usize,

    /// Characters of the answer kept as the text of a fallback claim
    pub fallback_text_chars: usize,

    /// Accept a review whose header count differs from its claim lines
    pub tolerate_count_mismatch: bool,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_review_length == 0 {
            return Err("max_review_length must be greater than 0".to_string());
        }
        if self.fallback_text_chars == 0 {
            return Err("fallback_text_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_review_length: 100_000,
            fallback_text_chars: 500,
            tolerate_count_mismatch: false,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: smaller inputs, grammar enforced exactly
    pub fn strict() -> Self {
        Self {
            max_review_length: 20_000,
            fallback_text_chars: 200,
            tolerate_count_mismatch: false,
        }
    }

    /// Lenient preset: large inputs, header count mismatches only warn
    pub fn lenient() -> Self {
        Self {
            max_review_length: 500_000,
            fallback_text_chars: 2_000,
            tolerate_count_mismatch: true,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
