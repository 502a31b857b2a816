//! Append-only quality log
//!
//! One self-describing JSON record per verification. Records are never
//! rewritten; aggregate statistics are recomputed from a full scan.

use crate::error::QualityError;
use chrono::{DateTime, Utc};
use jurisgraph_domain::VerificationResult;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Persisted record of one verification
///
/// Unknown fields are ignored on read and everything after `unsupported`
/// defaults when absent, so older and newer records scan together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityLogEntry {
    /// When the verification finished
    pub timestamp: DateTime<Utc>,

    /// User query
    pub query: String,

    /// Reconciled fidelity score
    pub fidelity_score: f64,

    /// Number of claims
    pub total_claims: usize,

    /// Claims with final verdict SUPPORTED
    pub supported: usize,

    /// Claims with final verdict UNSUPPORTED
    pub unsupported: usize,

    /// Claims with final verdict UNKNOWN
    #[serde(default)]
    pub unknown: usize,

    /// Every claim ended up SUPPORTED
    #[serde(default)]
    pub validated: bool,

    /// The reviewer enumerated no claims
    #[serde(default)]
    pub no_claims: bool,

    /// The reviewer output could not be parsed
    #[serde(default)]
    pub malformed_review: bool,

    /// Claims whose check was unavailable
    #[serde(default)]
    pub unconfirmed: usize,

    /// Reviewer/checker disagreements
    #[serde(default)]
    pub disagreements: usize,

    /// Problems, rendered as text
    #[serde(default)]
    pub problems: Vec<String>,

    /// Entity keys found in the graph
    #[serde(default)]
    pub verified_entities: Vec<String>,

    /// Entity keys absent from the graph
    #[serde(default)]
    pub missing_entities: Vec<String>,

    /// Score the reviewer reported for itself
    #[serde(default)]
    pub reviewer_score: Option<f64>,

    /// Length of the analyst answer
    #[serde(default)]
    pub analyst_chars: usize,

    /// Length of the reviewer output
    #[serde(default)]
    pub reviewer_chars: usize,
}

impl QualityLogEntry {
    /// Build the record for a verification result
    pub fn from_result(result: &VerificationResult, reviewer_chars: usize) -> Self {
        let timestamp = DateTime::<Utc>::from_timestamp(result.timestamp as i64, 0).unwrap_or_else(Utc::now);
        Self {
            timestamp,
            query: result.query.clone(),
            fidelity_score: result.fidelity_score,
            total_claims: result.total,
            supported: result.supported,
            unsupported: result.unsupported,
            unknown: result.unknown(),
            validated: result.is_validated(),
            no_claims: result.no_claims,
            malformed_review: result.malformed_review,
            unconfirmed: result.unconfirmed(),
            disagreements: result.disagreements(),
            problems: result.problems.iter().map(ToString::to_string).collect(),
            verified_entities: result.verified_entities.clone(),
            missing_entities: result.missing_entities.clone(),
            reviewer_score: result.reviewer_score,
            analyst_chars: result.answer.chars().count(),
            reviewer_chars,
        }
    }
}

/// Where quality records go
///
/// Injected into the pipeline rather than held globally, so tests can swap
/// in [`MemoryQualityLog`].
pub trait QualityLog: Send + Sync {
    /// Durably append one record; returns only once it is persisted
    fn append(&self, entry: &QualityLogEntry) -> Result<(), QualityError>;

    /// Every readable record, in append order
    fn entries(&self) -> Result<Vec<QualityLogEntry>, QualityError>;
}

/// Newline-delimited JSON file
#[derive(Debug)]
pub struct JsonlQualityLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlQualityLog {
    /// Log backed by the file at `path` (created on first append)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QualityLog for JsonlQualityLog {
    fn append(&self, entry: &QualityLogEntry) -> Result<(), QualityError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| QualityError::Unavailable("quality log lock poisoned".to_string()))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        // A single write keeps concurrent appenders from interleaving records
        file.write_all(line.as_bytes())?;
        file.sync_all()?;

        debug!(path = %self.path.display(), "quality entry appended");
        Ok(())
    }

    fn entries(&self) -> Result<Vec<QualityLogEntry>, QualityError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(parse_lines(&content))
    }
}

fn parse_lines(content: &str) -> Vec<QualityLogEntry> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(n, line)| match serde_json::from_str(line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(line = n + 1, error = %e, "skipping unreadable quality log line");
                None
            }
        })
        .collect()
}

/// In-memory log for tests and dry runs
#[derive(Debug)]
pub struct MemoryQualityLog {
    entries: Mutex<Vec<QualityLogEntry>>,
    available: AtomicBool,
}

impl Default for MemoryQualityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryQualityLog {
    /// Create an empty, writable log
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Make appends fail, or recover
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether no record has been stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QualityLog for MemoryQualityLog {
    fn append(&self, entry: &QualityLogEntry) -> Result<(), QualityError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(QualityError::Unavailable("memory log offline".to_string()));
        }
        self.entries
            .lock()
            .map_err(|_| QualityError::Unavailable("memory log lock poisoned".to_string()))?
            .push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<QualityLogEntry>, QualityError> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .map_err(|_| QualityError::Unavailable("memory log lock poisoned".to_string()))
    }
}
