//! Claim extraction with fallback

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::mentions::scan_dockets;
use crate::metrics::{parse_reviewer_metrics, ReviewerMetrics};
use crate::parser::parse_review;
use jurisgraph_domain::{Claim, ClaimKind, ClaimOrigin, Problem, Verdict};
use tracing::{debug, warn};

/// How the review was read
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionStatus {
    /// Review followed the grammar and listed at least one claim
    Parsed,

    /// Review followed the grammar but listed no claims
    NoClaims,

    /// Review could not be parsed
    Malformed {
        /// Parser diagnostic
        reason: String,
    },
}

/// Claims read from a review
///
/// `claims` is never empty: when the review is unusable a single fallback
/// claim stands in for the whole answer.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Claims with reviewer verdicts
    pub claims: Vec<Claim>,

    /// How the review was read
    pub status: ExtractionStatus,

    /// Metrics the reviewer reported for itself
    pub reviewer_metrics: Option<ReviewerMetrics>,
}

impl Extraction {
    /// The problem entry this extraction contributes, if any
    pub fn problem(&self) -> Option<Problem> {
        match &self.status {
            ExtractionStatus::Parsed => None,
            ExtractionStatus::NoClaims => Some(Problem::NoClaims),
            ExtractionStatus::Malformed { reason } => Some(Problem::MalformedReview {
                reason: reason.clone(),
            }),
        }
    }

    /// Whether the fallback claim was used
    pub fn is_fallback(&self) -> bool {
        !matches!(self.status, ExtractionStatus::Parsed)
    }
}

/// Turns reviewer output into claims
#[derive(Debug, Clone, Default)]
pub struct ClaimExtractor {
    config: ExtractorConfig,
}

impl ClaimExtractor {
    /// Create an extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parse the review strictly, without fallback
    pub fn parse(&self, review: &str) -> Result<Vec<Claim>, ExtractorError> {
        let length = review.chars().count();
        if length > self.config.max_review_length {
            return Err(ExtractorError::ReviewTooLong(length, self.config.max_review_length));
        }

        let parsed = parse_review(review, self.config.tolerate_count_mismatch)?;
        Ok(parsed
            .lines
            .into_iter()
            .map(|line| {
                let claim = Claim::new(line.index, line.kind, line.verdict, line.text)
                    .with_entities(line.entities);
                match line.value {
                    Some(value) => claim.with_value(value),
                    None => claim,
                }
            })
            .collect())
    }

    /// Extract claims, degrading to a single UNKNOWN claim over the answer
    ///
    /// Never fails: a malformed review or an empty claim list still yields one
    /// claim so the fidelity score stays defined, and the status records why.
    pub fn extract(&self, answer: &str, review: &str) -> Extraction {
        let reviewer_metrics = parse_reviewer_metrics(review);

        let (claims, status) = match self.parse(review) {
            Ok(claims) if !claims.is_empty() => (claims, ExtractionStatus::Parsed),
            Ok(_) => {
                warn!("review lists no claims, using fallback claim");
                (vec![self.fallback_claim(answer)], ExtractionStatus::NoClaims)
            }
            Err(e) => {
                warn!(error = %e, "review is malformed, using fallback claim");
                (
                    vec![self.fallback_claim(answer)],
                    ExtractionStatus::Malformed {
                        reason: e.to_string(),
                    },
                )
            }
        };

        debug!(claims = claims.len(), status = ?status, "extraction complete");
        Extraction {
            claims,
            status,
            reviewer_metrics,
        }
    }

    fn fallback_claim(&self, answer: &str) -> Claim {
        let text: String = answer.trim().chars().take(self.config.fallback_text_chars).collect();
        let text = if text.is_empty() {
            "(empty answer)".to_string()
        } else {
            text
        };

        Claim::new(1, ClaimKind::Other, Verdict::Unknown, text)
            .with_entities(scan_dockets(answer).into_iter().map(|k| k.to_string()))
            .with_origin(ClaimOrigin::Fallback)
    }
}
