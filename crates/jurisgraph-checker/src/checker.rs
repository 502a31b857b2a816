//! Deterministic re-checking of claims against the graph

use crate::cancel::{CancelSignal, PartialPolicy};
use crate::config::CheckerConfig;
use crate::error::CheckerError;
use crate::matcher::row_matches;
use crate::templates::{required_keys, template_for};
use futures::stream::{self, StreamExt};
use jurisgraph_domain::traits::{Bindings, GraphError, GraphRow, GraphStore, QueryTemplate};
use jurisgraph_domain::{CheckerVerdict, Claim, EntityKey};
use jurisgraph_graph::queries;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of checking one claim
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckOutcome {
    /// Checker verdict, `None` when the checker abstains
    pub verdict: Option<CheckerVerdict>,

    /// Detail for the problems list
    pub note: Option<String>,

    /// Entity keys found in the graph
    pub found: Vec<String>,

    /// Entity keys absent from the graph (ENTITY_NOT_FOUND)
    pub missing: Vec<String>,
}

impl CheckOutcome {
    fn abstain(reason: &str) -> Self {
        Self {
            note: Some(reason.to_string()),
            ..Self::default()
        }
    }

    fn unavailable(reason: String) -> Self {
        Self {
            verdict: Some(CheckerVerdict::Unavailable),
            note: Some(reason),
            ..Self::default()
        }
    }
}

/// Summary of a batch of checks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    /// Claims a template applied to
    pub attempted: usize,

    /// Claims the checker abstained on
    pub abstained: usize,

    /// Claims that ended CHECK_UNAVAILABLE
    pub unavailable: usize,

    /// Entity keys confirmed in the graph
    pub verified_entities: BTreeSet<String>,

    /// Entity keys referenced but absent from the graph
    pub missing_entities: BTreeSet<String>,

    /// Cancellation cut the batch short
    pub cancelled: bool,
}

enum Lookup {
    Matched,
    NoMatch { entity_exists: Option<bool> },
}

/// Checks claims with template queries, no language model involved
pub struct DeterministicChecker<G: GraphStore + ?Sized> {
    store: Arc<G>,
    config: CheckerConfig,
}

impl<G: GraphStore + ?Sized> DeterministicChecker<G> {
    /// Create a checker over a graph store
    pub fn new(store: Arc<G>, config: CheckerConfig) -> Self {
        Self { store, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Get the underlying store
    pub fn store(&self) -> &Arc<G> {
        &self.store
    }

    /// Run a read template under the configured timeout
    pub(crate) async fn read(
        &self,
        template: &QueryTemplate,
        bindings: &Bindings,
    ) -> Result<Vec<GraphRow>, GraphError> {
        match tokio::time::timeout(self.config.check_timeout(), self.store.run_read(template, bindings)).await {
            Ok(result) => result,
            Err(_) => Err(GraphError::Unavailable(format!(
                "{} query timed out after {} ms",
                template.id, self.config.check_timeout_ms
            ))),
        }
    }

    /// Check a single claim
    ///
    /// Abstains (verdict `None`) when no template applies or an entity key is
    /// missing or malformed. Store failures and timeouts yield
    /// `CheckerVerdict::Unavailable`, never `Unsupported`.
    pub async fn check_claim(&self, claim: &Claim) -> CheckOutcome {
        let Some(template) = template_for(claim.kind) else {
            return CheckOutcome::default();
        };

        let keys = match claim.entity_keys() {
            Ok(keys) => keys,
            Err(e) => {
                debug!(claim = claim.index, error = %e, "abstaining on malformed entity key");
                return CheckOutcome::abstain(&format!("malformed entity key: {}", e));
            }
        };
        if keys.len() < required_keys(claim.kind) {
            return CheckOutcome::abstain("missing entity key");
        }

        let mut outcome = CheckOutcome::default();
        let lookups: Vec<(EntityKey, Bindings)> = if template.id == queries::RELATION.id {
            let mut bindings = entity_bindings(&keys[0]);
            bindings.insert("target".to_string(), keys[1].as_str().to_string());
            vec![(keys[0].clone(), bindings)]
        } else {
            keys.iter().map(|k| (k.clone(), entity_bindings(k))).collect()
        };

        let target = (template.id == queries::RELATION.id).then(|| keys[1].clone());
        let mut unsupported = Vec::new();
        let mut unavailable = None;

        for (key, bindings) in lookups {
            match self.lookup(claim, template, &bindings).await {
                Ok(Lookup::Matched) => {
                    outcome.found.push(key.to_string());
                    if let Some(target) = &target {
                        outcome.found.push(target.to_string());
                    }
                }
                Ok(Lookup::NoMatch { entity_exists }) => {
                    match entity_exists {
                        Some(true) => {
                            outcome.found.push(key.to_string());
                            unsupported.push(format!("no matching {} for {}", template.id, key));
                        }
                        Some(false) => {
                            outcome.missing.push(key.to_string());
                            unsupported.push(format!("entity {} not found in graph", key));
                        }
                        None => unsupported.push(format!("no matching {} for {}", template.id, key)),
                    }
                    // A relation can also fail on its far end
                    if let Some(target) = &target {
                        match self.exists(&entity_bindings(target)).await {
                            Some(true) => outcome.found.push(target.to_string()),
                            Some(false) => {
                                outcome.missing.push(target.to_string());
                                unsupported.push(format!("entity {} not found in graph", target));
                            }
                            None => {}
                        }
                    }
                }
                Err(e) => {
                    warn!(claim = claim.index, entity = %key, error = %e, "check unavailable");
                    unavailable.get_or_insert_with(|| e.to_string());
                }
            }
        }

        // Definite absence outranks an unreachable sibling lookup
        if !unsupported.is_empty() {
            outcome.verdict = Some(CheckerVerdict::Unsupported);
            outcome.note = Some(unsupported.join("; "));
        } else if let Some(reason) = unavailable {
            outcome.verdict = Some(CheckerVerdict::Unavailable);
            outcome.note = Some(reason);
        } else {
            outcome.verdict = Some(CheckerVerdict::Supported);
        }
        outcome
    }

    async fn lookup(
        &self,
        claim: &Claim,
        template: &QueryTemplate,
        bindings: &Bindings,
    ) -> Result<Lookup, GraphError> {
        let rows = self.read(template, bindings).await?;
        let min_overlap = self.config.min_topic_overlap;

        if rows
            .iter()
            .any(|row| row_matches(claim.kind, claim.value.as_deref(), row, min_overlap))
        {
            return Ok(Lookup::Matched);
        }
        if !rows.is_empty() {
            return Ok(Lookup::NoMatch {
                entity_exists: Some(true),
            });
        }

        // Zero rows is a real answer; the probe only tells the two absences apart
        let entity_exists = self.exists(bindings).await;
        Ok(Lookup::NoMatch { entity_exists })
    }

    /// Whether the decision bound to `$entity` exists, `None` if the store failed
    async fn exists(&self, bindings: &Bindings) -> Option<bool> {
        match self.read(&queries::ENTITY_EXISTS, bindings).await {
            Ok(rows) => Some(!rows.is_empty()),
            Err(e) => {
                debug!(error = %e, "existence probe failed");
                None
            }
        }
    }

    /// Check every claim concurrently and write the verdicts onto them
    ///
    /// Checks are independent reads, issued up to `max_concurrency` at a time.
    /// If `cancel` fires, outstanding checks are dropped: under
    /// `PartialPolicy::Discard` the batch fails with `CheckerError::Cancelled`
    /// and the claims are left untouched, under `PartialPolicy::KeepResolved`
    /// unfinished claims become CHECK_UNAVAILABLE.
    pub async fn check_all(
        &self,
        claims: &mut [Claim],
        cancel: CancelSignal,
        policy: PartialPolicy,
    ) -> Result<CheckReport, CheckerError> {
        let (outcomes, cancelled) = self.run_checks(claims, cancel).await;
        if cancelled && policy == PartialPolicy::Discard {
            info!("checks cancelled, discarding results");
            return Err(CheckerError::Cancelled);
        }
        Ok(apply_outcomes(claims, outcomes, cancelled))
    }

    /// Like [`check_all`](Self::check_all) with `PartialPolicy::KeepResolved`, which cannot fail
    pub async fn check_all_partial(&self, claims: &mut [Claim], cancel: CancelSignal) -> CheckReport {
        let (outcomes, cancelled) = self.run_checks(claims, cancel).await;
        apply_outcomes(claims, outcomes, cancelled)
    }

    async fn run_checks(&self, claims: &[Claim], mut cancel: CancelSignal) -> (Vec<Option<CheckOutcome>>, bool) {
        let mut outcomes: Vec<Option<CheckOutcome>> = vec![None; claims.len()];
        if cancel.is_cancelled() {
            return (outcomes, true);
        }

        let mut pending = stream::iter(claims.iter().enumerate())
            .map(|(i, claim)| async move { (i, self.check_claim(claim).await) })
            .buffer_unordered(self.config.max_concurrency.max(1));

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return (outcomes, true),
                next = pending.next() => match next {
                    Some((i, outcome)) => outcomes[i] = Some(outcome),
                    None => return (outcomes, false),
                },
            }
        }
    }

    /// Whether the store answers at all
    pub async fn ping(&self) -> Result<(), GraphError> {
        self.read(&queries::PING, &Bindings::new()).await.map(|_| ())
    }
}

fn apply_outcomes(claims: &mut [Claim], outcomes: Vec<Option<CheckOutcome>>, cancelled: bool) -> CheckReport {
    let mut report = CheckReport {
        cancelled,
        ..CheckReport::default()
    };

    for (claim, outcome) in claims.iter_mut().zip(outcomes) {
        let outcome = match outcome {
            Some(outcome) => outcome,
            None if template_for(claim.kind).is_some() => {
                CheckOutcome::unavailable("check cancelled before completion".to_string())
            }
            None => CheckOutcome::default(),
        };

        match outcome.verdict {
            None => report.abstained += 1,
            Some(verdict) => {
                report.attempted += 1;
                if verdict == CheckerVerdict::Unavailable {
                    report.unavailable += 1;
                }
            }
        }
        report.verified_entities.extend(outcome.found);
        report.missing_entities.extend(outcome.missing);

        claim.checker_verdict = outcome.verdict;
        claim.checker_note = match outcome.verdict {
            Some(_) => outcome.note,
            None => None,
        };
    }

    info!(
        attempted = report.attempted,
        abstained = report.abstained,
        unavailable = report.unavailable,
        cancelled = report.cancelled,
        "claims checked"
    );
    report
}

fn entity_bindings(key: &EntityKey) -> Bindings {
    Bindings::from([("entity".to_string(), key.as_str().to_string())])
}
