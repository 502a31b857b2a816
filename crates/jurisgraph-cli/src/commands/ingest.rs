//! Ingest command implementation.

use crate::cli::IngestArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use jurisgraph_graph::{ensure_schema, ingest_decision, Decision};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// A decision file holds one record or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DecisionFile {
    Many(Vec<Decision>),
    One(Box<Decision>),
}

impl DecisionFile {
    fn into_decisions(self) -> Vec<Decision> {
        match self {
            DecisionFile::Many(decisions) => decisions,
            DecisionFile::One(decision) => vec![*decision],
        }
    }
}

/// Execute the ingest command.
pub async fn execute_ingest(args: IngestArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    // Parse everything first so a bad file writes nothing
    let mut decisions = Vec::new();
    for path in &args.files {
        decisions.extend(read_decisions(path)?);
    }
    if decisions.is_empty() {
        return Err(CliError::InvalidInput("No decisions found in the given files".to_string()));
    }

    let store = super::connect_graph(config).await?;
    if !args.skip_schema {
        ensure_schema(store.as_ref()).await?;
    }
    for decision in &decisions {
        ingest_decision(store.as_ref(), decision).await?;
        info!(docket = %decision.docket, "decision ingested");
    }

    println!("{}", formatter.ingested(decisions.len(), args.files.len()));
    Ok(())
}

fn read_decisions(path: &Path) -> Result<Vec<Decision>> {
    let contents = fs::read_to_string(path)?;
    let file: DecisionFile = serde_json::from_str(&contents)
        .map_err(|e| CliError::InvalidInput(format!("{}: {}", path.display(), e)))?;
    Ok(file.into_decisions())
}
