//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use jurisgraph_graph::GraphConfig;
use jurisgraph_llm::LlmConfig;
use jurisgraph_verifier::VerifierConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Neo4j connection
    #[serde(default)]
    pub graph: GraphConfig,

    /// Analyst and reviewer model
    #[serde(default)]
    pub llm: LlmConfig,

    /// Verification pipeline
    #[serde(default)]
    pub verifier: VerifierConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file and REPL history.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".jurisgraph"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration, then apply environment overrides.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        let config = config.with_env_overrides();
        config.verifier.validate().map_err(CliError::Config)?;
        config.llm.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::Config(format!("Config file {} does not exist", path.display())));
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Apply `NEO4J_*`, `OLLAMA_ENDPOINT`, `JURISGRAPH_MODEL` and `JURISGRAPH_QUALITY_LOG`.
    pub fn with_env_overrides(mut self) -> Self {
        self.graph = self.graph.with_env_overrides();
        self.llm = self.llm.with_env_overrides();
        if let Ok(path) = std::env::var("JURISGRAPH_QUALITY_LOG") {
            self.verifier.quality.log_path = PathBuf::from(path);
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}
