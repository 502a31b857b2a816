//! Status command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, StatusInfo};

/// Execute the status command.
pub async fn execute_status(config: &Config, formatter: &Formatter) -> Result<()> {
    let graph = match super::connect_graph(config).await {
        Ok(store) => {
            let verifier = jurisgraph_verifier::Verifier::new(store, super::open_log(config), config.verifier.clone())?;
            verifier.ping().await.map_err(|e| e.to_string())
        }
        Err(e) => Err(e.to_string()),
    };

    let logged = super::open_log(config).entries().ok().map(|entries| entries.len());

    let status = StatusInfo {
        graph_uri: config.graph.uri.clone(),
        graph,
        log_path: config.verifier.quality.log_path.display().to_string(),
        logged,
        model: config.llm.model.clone(),
    };
    println!("{}", formatter.format_status(&status)?);
    Ok(())
}
