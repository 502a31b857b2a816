//! Pipeline configuration

use jurisgraph_checker::CheckerConfig;
use jurisgraph_extractor::ExtractorConfig;
use jurisgraph_quality::QualityConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the whole verification pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Reviewer parsing
    pub extractor: ExtractorConfig,

    /// Deterministic checks
    pub checker: CheckerConfig,

    /// Quality log
    pub quality: QualityConfig,

    /// Analyst and reviewer calls
    pub generation: GenerationConfig,
}

/// Bounds on the analyst and reviewer calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Upper bound on each call (seconds)
    pub timeout_secs: u64,

    /// Ask the reviewer for a self-reported metrics block
    pub reviewer_metrics: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 180,
            reviewer_metrics: true,
        }
    }
}

impl GenerationConfig {
    /// Call timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl VerifierConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.extractor.validate()?;
        self.checker.validate()?;
        self.quality.validate()?;
        if self.generation.timeout_secs == 0 {
            return Err("generation.timeout_secs must be > 0".to_string());
        }
        Ok(())
    }

    /// Load from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_default_independently() {
        let config = VerifierConfig::from_toml("[checker]\ncheck_timeout_ms = 250\n").unwrap();
        assert_eq!(config.checker.check_timeout_ms, 250);
        assert_eq!(config.checker.max_concurrency, CheckerConfig::default().max_concurrency);
        assert_eq!(config.extractor, ExtractorConfig::default());
        assert_eq!(config.generation.timeout_secs, 180);
    }

    #[test]
    fn test_invalid_section_rejected() {
        assert!(VerifierConfig::from_toml("[checker]\nmax_concurrency = 0\n").is_err());
    }
}
