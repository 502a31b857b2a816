//! JurisGraph Graph Store Adapter
//!
//! Implements the `GraphStore` trait from `jurisgraph-domain`.
//!
//! # Stores
//!
//! - `Neo4jGraph`: Bolt connection to a Neo4j server
//! - `MemoryGraph`: in-process decision graph for tests and offline runs
//!
//! The schema, the read templates and the ingestion statements live here too,
//! since they are the only place that knows node labels and relationship
//! types.
//!
//! # Examples
//!
//! ```
//! use jurisgraph_graph::{MemoryGraph, Decision};
//!
//! let graph = MemoryGraph::new();
//! graph.insert(Decision::new("HC 161.450", "HC").with_rapporteur("Gilmar Mendes"));
//! assert_eq!(graph.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod digest;
pub mod memory;
pub mod neo4j;
pub mod queries;
pub mod schema;

pub use config::GraphConfig;
pub use digest::{decision_digest, render_digest, DecisionSummary};
pub use memory::MemoryGraph;
pub use neo4j::Neo4jGraph;
pub use schema::{ensure_schema, ingest_decision, ArticleRef, Decision, SchemaError, TopicRef};
