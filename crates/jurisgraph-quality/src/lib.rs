//! JurisGraph Quality Aggregator
//!
//! Scores adjudicated claims, appends one record per verification to an
//! append-only log and recomputes aggregate statistics from that log.
//!
//! # Example
//!
//! ```
//! use jurisgraph_quality::{fidelity_score, AggregateReport};
//!
//! assert_eq!(fidelity_score(7, 8), 87.5);
//! assert_eq!(fidelity_score(0, 0), 0.0);
//! assert_eq!(AggregateReport::from_entries(&[]).queries, 0);
//! ```

#![warn(missing_docs)]

pub mod aggregator;
pub mod agreement;
pub mod config;
pub mod error;
pub mod log;
pub mod report;
pub mod score;
pub mod summary;

pub use aggregator::{Adjudication, QualityAggregator};
pub use agreement::{Agreement, AgreementLevel};
pub use config::QualityConfig;
pub use error::QualityError;
pub use log::{JsonlQualityLog, MemoryQualityLog, QualityLog, QualityLogEntry};
pub use report::AggregateReport;
pub use score::{fidelity_score, Tally};
pub use summary::render_summary;

/// Result type for quality operations
pub type Result<T> = std::result::Result<T, QualityError>;
