//! The verification pipeline
//!
//! extraction → deterministic checks → negation probe → reconciliation →
//! scoring → durable log append. Stages run in order; only the per-claim
//! checks inside the checker run concurrently.

use crate::condition::Condition;
use crate::config::VerifierConfig;
use crate::error::VerifyError;
use jurisgraph_checker::{CancelSignal, CheckReport, DeterministicChecker, NegationProbe, PartialPolicy, ProbeStatus};
use jurisgraph_domain::traits::{GraphError, GraphStore};
use jurisgraph_domain::{reconcile_claims, Problem, VerificationResult};
use jurisgraph_extractor::{ClaimExtractor, Extraction, ExtractionStatus};
use jurisgraph_quality::{
    Adjudication, AggregateReport, Agreement, QualityAggregator, QualityLog, QualityLogEntry,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Inputs of one verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// User query
    pub query: String,
    /// Analyst answer
    pub answer: String,
    /// Reviewer output
    pub review: String,
}

impl VerifyRequest {
    /// Create a request
    pub fn new(query: impl Into<String>, answer: impl Into<String>, review: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            answer: answer.into(),
            review: review.into(),
        }
    }
}

/// A verification result together with what went wrong on the way
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    /// The adjudicated result
    pub result: VerificationResult,

    /// Degraded conditions met, in pipeline order
    pub conditions: Vec<Condition>,

    /// Reviewer versus final score
    pub agreement: Agreement,

    /// The persisted record, when the log write succeeded
    pub log_entry: Option<QualityLogEntry>,

    /// Negation probe conclusion
    pub probe: ProbeStatus,
}

impl VerificationOutcome {
    /// Exit code for CLI callers
    pub fn exit_code(&self) -> i32 {
        crate::condition::exit_code(&self.conditions)
    }
}

/// Verifies analyst answers against the decision graph
pub struct Verifier {
    extractor: ClaimExtractor,
    checker: DeterministicChecker<dyn GraphStore>,
    aggregator: QualityAggregator,
    config: VerifierConfig,
}

impl Verifier {
    /// Create a verifier over a graph store and a quality log
    pub fn new(store: Arc<dyn GraphStore>, log: Arc<dyn QualityLog>, config: VerifierConfig) -> Result<Self, VerifyError> {
        config.validate().map_err(VerifyError::Config)?;
        Ok(Self {
            extractor: ClaimExtractor::new(config.extractor.clone()),
            checker: DeterministicChecker::new(store, config.checker.clone()),
            aggregator: QualityAggregator::new(log),
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Get the graph store
    pub fn store(&self) -> &Arc<dyn GraphStore> {
        self.checker.store()
    }

    /// Verify an answer; never fails
    ///
    /// Every degraded path (malformed review, unreachable graph, failed log
    /// write) is reported in the outcome's conditions instead.
    pub async fn verify(&self, query: &str, answer: &str, review: &str) -> VerificationOutcome {
        let request = VerifyRequest::new(query, answer, review);
        let mut extraction = self.extractor.extract(&request.answer, &request.review);
        let report = self
            .checker
            .check_all_partial(&mut extraction.claims, CancelSignal::never())
            .await;
        self.complete(request, extraction, report).await
    }

    /// Verify with query-level cancellation
    ///
    /// Under `PartialPolicy::Discard` a cancellation fails the whole
    /// verification; under `PartialPolicy::KeepResolved` claims checked before
    /// the cancellation keep their verdicts and the rest become unconfirmed.
    pub async fn verify_with_cancel(
        &self,
        request: VerifyRequest,
        cancel: CancelSignal,
        policy: PartialPolicy,
    ) -> Result<VerificationOutcome, VerifyError> {
        let mut extraction = self.extractor.extract(&request.answer, &request.review);
        let report = self.checker.check_all(&mut extraction.claims, cancel, policy).await?;
        Ok(self.complete(request, extraction, report).await)
    }

    /// Recompute the aggregate report from the full log
    pub fn aggregate_report(&self) -> Result<AggregateReport, VerifyError> {
        Ok(self.aggregator.report()?)
    }

    /// Check that the graph store answers, within the check timeout
    pub async fn ping(&self) -> Result<(), GraphError> {
        self.checker.ping().await
    }

    #[instrument(skip_all, fields(query = %request.query))]
    async fn complete(&self, request: VerifyRequest, extraction: Extraction, report: CheckReport) -> VerificationOutcome {
        let mut conditions = Vec::new();
        match &extraction.status {
            ExtractionStatus::Parsed => {}
            ExtractionStatus::NoClaims => conditions.push(Condition::NoClaims),
            ExtractionStatus::Malformed { reason } => conditions.push(Condition::MalformedReview {
                reason: reason.clone(),
            }),
        }

        let mut problems: Vec<Problem> = extraction.problem().into_iter().collect();
        let reviewer_score = extraction.reviewer_metrics.as_ref().map(|m| m.fidelity_score);
        let mut claims = extraction.claims;

        let probe = if report.cancelled {
            NegationProbe {
                claims: Vec::new(),
                status: ProbeStatus::NotApplicable,
            }
        } else {
            self.checker
                .probe_negation(&request.query, &request.answer, claims.len() + 1)
                .await
        };

        let mut verified: BTreeSet<String> = report.verified_entities;
        verified.extend(probe.claims.iter().flat_map(|c| c.entities.iter().cloned()));
        claims.extend(probe.claims);

        problems.extend(reconcile_claims(&mut claims));

        let probe_down = matches!(probe.status, ProbeStatus::Unavailable(_));
        if let ProbeStatus::Unavailable(reason) = &probe.status {
            problems.push(Problem::NegationUnchecked { reason: reason.clone() });
        }
        if report.unavailable > 0 || probe_down {
            conditions.push(Condition::GraphUnavailable {
                unavailable: report.unavailable,
                attempted: report.attempted,
            });
        }

        let result = self.aggregator.finalize(Adjudication {
            query: request.query,
            answer: request.answer,
            claims,
            problems,
            no_claims: extraction.status == ExtractionStatus::NoClaims,
            malformed_review: matches!(extraction.status, ExtractionStatus::Malformed { .. }),
            verified_entities: verified.into_iter().collect(),
            missing_entities: report.missing_entities.into_iter().collect(),
            reviewer_score,
        });

        let log_entry = if self.config.quality.enabled {
            match self.aggregator.record(&result, request.review.chars().count()) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "verification not logged");
                    conditions.push(Condition::LogWriteFailed { reason: e.to_string() });
                    None
                }
            }
        } else {
            None
        };

        let agreement = Agreement::assess(&result);
        info!(
            score = result.fidelity_score,
            supported = result.supported,
            total = result.total,
            conditions = conditions.len(),
            "verification complete"
        );

        VerificationOutcome {
            result,
            conditions,
            agreement,
            log_entry,
            probe: probe.status,
        }
    }
}
