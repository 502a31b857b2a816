//! JurisGraph Deterministic Checker
//!
//! Re-checks each claim against the decision graph with fixed query
//! templates. No language model is involved, so the same graph and the same
//! claims always give the same verdicts.
//!
//! A claim whose store call fails or times out is marked CHECK_UNAVAILABLE,
//! never UNSUPPORTED: an unreachable graph is not evidence of absence.

#![warn(missing_docs)]

pub mod cancel;
pub mod checker;
pub mod config;
pub mod error;
pub mod matcher;
pub mod probe;
pub mod templates;

pub use cancel::{CancelHandle, CancelSignal, PartialPolicy};
pub use checker::{CheckOutcome, CheckReport, DeterministicChecker};
pub use config::CheckerConfig;
pub use error::CheckerError;
pub use probe::{asserts_absence, NegationProbe, ProbeStatus};
pub use templates::{required_keys, template_for};

/// Result type for checker operations
pub type Result<T> = std::result::Result<T, CheckerError>;
