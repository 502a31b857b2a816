//! JurisGraph Domain Layer
//!
//! Core types for verifying a language-model answer about court decisions
//! against a knowledge graph.
//!
//! ## Key Concepts
//!
//! - **Claim**: an atomic factual assertion taken from an answer, carrying the
//!   reviewer's verdict, the deterministic checker's verdict (if any) and the
//!   reconciled final verdict
//! - **Entity key**: a normalized docket number such as `HC 161.450`
//! - **Reconciliation**: the fixed precedence that turns two verdicts into one
//! - **VerificationResult**: the adjudicated claim set for one query
//!
//! ## Architecture
//!
//! Infrastructure lives in other crates. This crate only defines values, the
//! pure reconciliation function and the collaborator traits
//! ([`traits::GraphStore`], [`traits::TextGenerator`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod entity;
pub mod problem;
pub mod reconciliation;
pub mod result;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use claim::{Claim, ClaimId, ClaimKind, ClaimOrigin};
pub use entity::{EntityKey, EntityKeyError};
pub use problem::Problem;
pub use reconciliation::{reconcile, reconcile_claims, Outcome, Resolution};
pub use result::VerificationResult;
pub use verdict::{CheckerVerdict, Verdict};
