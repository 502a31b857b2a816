//! Turning adjudicated claims into a scored, logged result

use crate::error::QualityError;
use crate::log::{QualityLog, QualityLogEntry};
use crate::report::AggregateReport;
use crate::score::{fidelity_score, Tally};
use chrono::Utc;
use jurisgraph_domain::{Claim, Problem, VerificationResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything known about a verification once reconciliation is done
#[derive(Debug, Clone, Default)]
pub struct Adjudication {
    /// User query
    pub query: String,
    /// Analyst answer
    pub answer: String,
    /// Reconciled claims
    pub claims: Vec<Claim>,
    /// Problems gathered so far
    pub problems: Vec<Problem>,
    /// The reviewer enumerated no claims
    pub no_claims: bool,
    /// The reviewer output could not be parsed
    pub malformed_review: bool,
    /// Entity keys found in the graph
    pub verified_entities: Vec<String>,
    /// Entity keys absent from the graph
    pub missing_entities: Vec<String>,
    /// Score the reviewer reported for itself
    pub reviewer_score: Option<f64>,
}

/// Scores results and keeps the quality log
pub struct QualityAggregator {
    log: Arc<dyn QualityLog>,
}

impl QualityAggregator {
    /// Create an aggregator writing to `log`
    pub fn new(log: Arc<dyn QualityLog>) -> Self {
        Self { log }
    }

    /// The injected log
    pub fn log(&self) -> &Arc<dyn QualityLog> {
        &self.log
    }

    /// Build the verification result
    ///
    /// A no-claims verification scores 0 whatever its synthesized claims say.
    pub fn finalize(&self, adjudication: Adjudication) -> VerificationResult {
        let tally = Tally::of(&adjudication.claims);
        let fidelity_score = if adjudication.no_claims {
            0.0
        } else {
            fidelity_score(tally.supported, tally.total)
        };

        VerificationResult {
            query: adjudication.query,
            answer: adjudication.answer,
            claims: adjudication.claims,
            total: tally.total,
            supported: tally.supported,
            unsupported: tally.unsupported,
            fidelity_score,
            timestamp: Utc::now().timestamp().max(0) as u64,
            problems: adjudication.problems,
            no_claims: adjudication.no_claims,
            malformed_review: adjudication.malformed_review,
            verified_entities: adjudication.verified_entities,
            missing_entities: adjudication.missing_entities,
            reviewer_score: adjudication.reviewer_score,
        }
    }

    /// Durably append the record for `result`
    pub fn record(&self, result: &VerificationResult, reviewer_chars: usize) -> Result<QualityLogEntry, QualityError> {
        let entry = QualityLogEntry::from_result(result, reviewer_chars);
        match self.log.append(&entry) {
            Ok(()) => {
                info!(score = entry.fidelity_score, claims = entry.total_claims, "quality entry recorded");
                Ok(entry)
            }
            Err(e) => {
                warn!(error = %e, "quality log write failed");
                Err(e)
            }
        }
    }

    /// Recompute the aggregate report from the full log
    pub fn report(&self) -> Result<AggregateReport, QualityError> {
        Ok(AggregateReport::from_entries(&self.log.entries()?))
    }
}
