//! Verification results - the adjudicated claim set for one query

use crate::claim::Claim;
use crate::problem::Problem;
use crate::verdict::{CheckerVerdict, Verdict};

/// Outcome of verifying one answer
///
/// Owns its claims. Built by the quality aggregator, which guarantees
/// `supported <= total` and a fidelity score in `[0, 100]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    /// User query
    pub query: String,

    /// Analyst answer that was verified
    pub answer: String,

    /// Adjudicated claims, in extraction order
    pub claims: Vec<Claim>,

    /// Number of claims
    pub total: usize,

    /// Claims whose final verdict is SUPPORTED
    pub supported: usize,

    /// Claims whose final verdict is UNSUPPORTED
    pub unsupported: usize,

    /// Fidelity score, rounded to one decimal
    pub fidelity_score: f64,

    /// Unix timestamp (seconds)
    pub timestamp: u64,

    /// Problems flagged for human review
    pub problems: Vec<Problem>,

    /// The reviewer enumerated no claims
    pub no_claims: bool,

    /// The reviewer output could not be parsed
    pub malformed_review: bool,

    /// Entity keys the checker could resolve in the graph
    pub verified_entities: Vec<String>,

    /// Entity keys referenced by claims but absent from the graph
    pub missing_entities: Vec<String>,

    /// Score the reviewer reported for itself, if it did
    pub reviewer_score: Option<f64>,
}

impl VerificationResult {
    /// Claims whose final verdict is UNKNOWN
    pub fn unknown(&self) -> usize {
        self.total - self.supported - self.unsupported
    }

    /// Every claim ended up SUPPORTED and the review was usable
    pub fn is_validated(&self) -> bool {
        self.total > 0 && !self.no_claims && !self.malformed_review && self.supported == self.total
    }

    /// Claims the checker rendered an opinion on
    pub fn checked(&self) -> usize {
        self.claims
            .iter()
            .filter(|c| c.checker_verdict.and_then(|v| v.opinion()).is_some())
            .count()
    }

    /// Claims the checker could not reach the graph for
    pub fn unconfirmed(&self) -> usize {
        self.claims
            .iter()
            .filter(|c| c.checker_verdict == Some(CheckerVerdict::Unavailable))
            .count()
    }

    /// Disagreement entries in the problems list
    pub fn disagreements(&self) -> usize {
        self.problems.iter().filter(|p| p.is_disagreement()).count()
    }

    /// Share of claims the reviewer itself marked SUPPORTED, as a percentage
    pub fn reviewer_supported_share(&self) -> f64 {
        if self.claims.is_empty() {
            return 0.0;
        }
        let supported = self
            .claims
            .iter()
            .filter(|c| c.reviewer_verdict == Verdict::Supported)
            .count();
        supported as f64 / self.claims.len() as f64 * 100.0
    }
}
