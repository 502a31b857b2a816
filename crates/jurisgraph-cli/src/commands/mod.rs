//! Command implementations.

pub mod ask;
pub mod ingest;
pub mod report;
pub mod status;
pub mod verify;

pub use self::ask::execute_ask;
pub use self::ingest::execute_ingest;
pub use self::report::execute_report;
pub use self::status::execute_status;
pub use self::verify::execute_verify;

use crate::config::Config;
use crate::error::Result;
use jurisgraph_domain::traits::{GraphError, GraphStore};
use jurisgraph_graph::{MemoryGraph, Neo4jGraph};
use jurisgraph_quality::{JsonlQualityLog, QualityLog};
use jurisgraph_verifier::Verifier;
use std::sync::Arc;
use tracing::warn;

/// Connect to the configured Neo4j server.
pub async fn connect_graph(config: &Config) -> std::result::Result<Arc<dyn GraphStore>, GraphError> {
    let graph = Neo4jGraph::connect(&config.graph).await?;
    Ok(Arc::new(graph))
}

/// Connect to the graph, or stand in an offline store whose every read
/// reports the graph unavailable.
pub async fn connect_graph_or_offline(config: &Config) -> Arc<dyn GraphStore> {
    match connect_graph(config).await {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, uri = %config.graph.uri, "graph unreachable, checks will be unconfirmed");
            let offline = MemoryGraph::new();
            offline.set_available(false);
            Arc::new(offline)
        }
    }
}

/// Open the configured quality log.
pub fn open_log(config: &Config) -> Arc<dyn QualityLog> {
    Arc::new(JsonlQualityLog::new(config.verifier.quality.log_path.clone()))
}

/// Build a verifier over the configured graph and log.
pub async fn build_verifier(config: &Config) -> Result<Verifier> {
    let store = connect_graph_or_offline(config).await;
    Ok(Verifier::new(store, open_log(config), config.verifier.clone())?)
}
