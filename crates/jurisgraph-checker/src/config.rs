//! Checker configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the deterministic checker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Upper bound on every graph call (milliseconds); expiry means CHECK_UNAVAILABLE
    #[serde(default = "default_check_timeout_ms")]
    pub check_timeout_ms: u64,

    /// Claims checked concurrently
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Shared words needed for a topic description to match
    #[serde(default = "default_min_topic_overlap")]
    pub min_topic_overlap: usize,

    /// Run the negation probe when an answer denies something exists
    #[serde(default = "default_negation_probe")]
    pub negation_probe: bool,
}

fn default_check_timeout_ms() -> u64 {
    5_000
}

fn default_max_concurrency() -> usize {
    8
}

fn default_min_topic_overlap() -> usize {
    2
}

fn default_negation_probe() -> bool {
    true
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            check_timeout_ms: default_check_timeout_ms(),
            max_concurrency: default_max_concurrency(),
            min_topic_overlap: default_min_topic_overlap(),
            negation_probe: default_negation_probe(),
        }
    }
}

impl CheckerConfig {
    /// Fast preset: short timeout, wide fan-out
    pub fn fast() -> Self {
        Self {
            check_timeout_ms: 1_000,
            max_concurrency: 16,
            ..Self::default()
        }
    }

    /// Thorough preset: patient timeout, gentle on the store
    pub fn thorough() -> Self {
        Self {
            check_timeout_ms: 30_000,
            max_concurrency: 4,
            ..Self::default()
        }
    }

    /// Per-call timeout as a Duration
    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.check_timeout_ms == 0 {
            return Err("check_timeout_ms must be greater than 0".to_string());
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        if self.min_topic_overlap == 0 {
            return Err("min_topic_overlap must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(CheckerConfig::default().validate().is_ok());
        assert!(CheckerConfig::fast().validate().is_ok());
        assert!(CheckerConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = CheckerConfig {
            max_concurrency: 0,
            ..CheckerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CheckerConfig {
            check_timeout_ms: 0,
            ..CheckerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config = CheckerConfig::from_toml("check_timeout_ms = 250").unwrap();
        assert_eq!(config.check_timeout(), Duration::from_millis(250));
        assert_eq!(config.max_concurrency, 8);
        assert!(config.negation_probe);
    }
}
