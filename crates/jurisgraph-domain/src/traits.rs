//! Trait definitions for collaborators
//!
//! The core never talks to a database or a language model directly; it goes
//! through these traits so tests can substitute in-memory doubles.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Identifies a read template so stores can dispatch without parsing query text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// Decision and its rapporteur
    Attribution,
    /// Decision and the topics it deals with
    Topic,
    /// Decision and the articles it cites
    Citation,
    /// Path of up to three hops between two decisions
    Relation,
    /// Whether a decision exists at all
    EntityExists,
    /// Every decision/topic pair
    TopicIndex,
    /// Every decision with its relations, for prompt context
    DecisionDigest,
    /// Connectivity probe
    Ping,
}

impl TemplateId {
    /// Stable name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Attribution => "attribution",
            TemplateId::Topic => "topic",
            TemplateId::Citation => "citation",
            TemplateId::Relation => "relation",
            TemplateId::EntityExists => "entity_exists",
            TemplateId::TopicIndex => "topic_index",
            TemplateId::DecisionDigest => "decision_digest",
            TemplateId::Ping => "ping",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameterized read query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTemplate {
    /// Template identity
    pub id: TemplateId,
    /// Cypher text with `$name` parameters
    pub cypher: &'static str,
    /// Columns every returned row carries
    pub columns: &'static [&'static str],
}

/// Parameter bindings for a template
pub type Bindings = BTreeMap<String, String>;

/// One result row, column name to textual value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphRow(BTreeMap<String, String>);

impl GraphRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column value
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    /// Insert a column value
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Get a column value
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }
}

/// Errors from a graph store
///
/// `Unavailable` means the store could not answer and is never equivalent to
/// an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Connection failure, timeout or refused session
    #[error("graph store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with an error for this query
    #[error("graph query failed: {0}")]
    Query(String),

    /// A row lacked a declared column or had an unreadable value
    #[error("unexpected row shape: {0}")]
    RowShape(String),
}

/// Read/write access to the decision graph
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Run a read template; zero rows is `Ok(vec![])`, never an error
    async fn run_read(
        &self,
        template: &QueryTemplate,
        bindings: &Bindings,
    ) -> Result<Vec<GraphRow>, GraphError>;

    /// Run a write statement (ingestion only)
    async fn run_write(&self, statement: &str, bindings: &Bindings) -> Result<(), GraphError>;
}

/// Text generation service (analyst and reviewer calls)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Error type for generation failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate text from a prompt
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}
