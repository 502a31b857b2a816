//! JurisGraph Verifier
//!
//! Runs the whole verification of one analyst answer: claim extraction,
//! deterministic checks, reconciliation, scoring and logging.
//!
//! # Example
//!
//! ```
//! use jurisgraph_graph::{Decision, MemoryGraph};
//! use jurisgraph_quality::MemoryQualityLog;
//! use jurisgraph_verifier::{Verifier, VerifierConfig};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let graph = MemoryGraph::with_decisions([Decision::new("HC 161.450", "HC").with_rapporteur("Gilmar Mendes")]);
//! let verifier = Verifier::new(Arc::new(graph), Arc::new(MemoryQualityLog::new()), VerifierConfig::default()).unwrap();
//!
//! let review = "CLAIMS: 1\n[1] SUPPORTED | ATTRIBUTION | HC 161.450 | Gilmar Mendes | reported by Gilmar Mendes";
//! let outcome = verifier.verify("who reported HC 161.450?", "Gilmar Mendes.", review).await;
//! assert_eq!(outcome.result.fidelity_score, 100.0);
//! assert_eq!(outcome.exit_code(), 0);
//! # }
//! ```

#![warn(missing_docs)]

pub mod ask;
pub mod condition;
pub mod config;
pub mod error;
pub mod verifier;

pub use ask::AskOutcome;
pub use condition::{exit_code, Condition};
pub use config::{GenerationConfig, VerifierConfig};
pub use error::VerifyError;
pub use verifier::{VerificationOutcome, Verifier, VerifyRequest};

// Pipeline-facing types callers need alongside the verifier
pub use jurisgraph_checker::{CancelHandle, CancelSignal, PartialPolicy, ProbeStatus};

/// Result type for verifier operations
pub type Result<T> = std::result::Result<T, VerifyError>;
