//! Neo4j store over Bolt
//!
//! Driver failures are split into two classes: errors the server reports for a
//! statement become `GraphError::Query`, everything else (connection refused,
//! broken pipe, pool exhaustion) becomes `GraphError::Unavailable`.

use crate::config::GraphConfig;
use crate::queries::LIST_SEPARATOR;
use async_trait::async_trait;
use jurisgraph_domain::traits::{Bindings, GraphError, GraphRow, GraphStore, QueryTemplate};
use neo4rs::{query, ConfigBuilder, Graph, Query, Row};
use tracing::{debug, info};

/// Graph store backed by a Neo4j server
pub struct Neo4jGraph {
    graph: Graph,
    uri: String,
}

impl Neo4jGraph {
    /// Connect using the given configuration
    ///
    /// # Errors
    ///
    /// Returns `GraphError::Unavailable` if the server cannot be reached
    /// within `connect_timeout_ms`.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .max_connections(config.max_connections)
            .build()
            .map_err(|e| GraphError::Unavailable(format!("invalid connection settings: {}", e)))?;

        let graph = tokio::time::timeout(config.connect_timeout(), Graph::connect(neo_config))
            .await
            .map_err(|_| GraphError::Unavailable(format!("connect to {} timed out", config.uri)))?
            .map_err(classify)?;

        info!(uri = %config.uri, "connected to neo4j");
        Ok(Self {
            graph,
            uri: config.uri.clone(),
        })
    }

    /// URI this store is connected to
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

fn classify(err: neo4rs::Error) -> GraphError {
    match &err {
        neo4rs::Error::Neo4j(_) => GraphError::Query(err.to_string()),
        _ => GraphError::Unavailable(err.to_string()),
    }
}

fn bound(text: &str, bindings: &Bindings) -> Query {
    bindings
        .iter()
        .fold(query(text), |q, (name, value)| q.param(name.as_str(), value.as_str()))
}

// Columns come back as strings, integers or lists of strings
fn column(row: &Row, name: &str) -> Result<String, GraphError> {
    if let Ok(text) = row.get::<String>(name) {
        return Ok(text);
    }
    if let Ok(number) = row.get::<i64>(name) {
        return Ok(number.to_string());
    }
    if let Ok(list) = row.get::<Vec<String>>(name) {
        return Ok(list.join(LIST_SEPARATOR));
    }
    Err(GraphError::RowShape(format!("column '{}' missing or not textual", name)))
}

#[async_trait]
impl GraphStore for Neo4jGraph {
    async fn run_read(
        &self,
        template: &QueryTemplate,
        bindings: &Bindings,
    ) -> Result<Vec<GraphRow>, GraphError> {
        let mut stream = self
            .graph
            .execute(bound(template.cypher, bindings))
            .await
            .map_err(classify)?;

        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.map_err(classify)? {
            let mut out = GraphRow::new();
            for name in template.columns {
                out.insert(*name, column(&row, name)?);
            }
            rows.push(out);
        }

        debug!(template = %template.id, rows = rows.len(), "read complete");
        Ok(rows)
    }

    async fn run_write(&self, statement: &str, bindings: &Bindings) -> Result<(), GraphError> {
        self.graph
            .run(bound(statement, bindings))
            .await
            .map_err(classify)
    }
}
