//! Aggregate statistics over the quality log

use crate::log::QualityLogEntry;
use crate::score::to_tenths;
use serde::{Deserialize, Serialize};

/// Read-only projection of the whole log, recomputed on every request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Logged verifications
    pub queries: usize,

    /// Mean fidelity score
    pub mean_score: f64,

    /// Lowest fidelity score
    pub min_score: f64,

    /// Highest fidelity score
    pub max_score: f64,

    /// Claims across all verifications
    pub total_claims: usize,

    /// SUPPORTED claims across all verifications
    pub total_supported: usize,

    /// UNSUPPORTED claims across all verifications
    pub total_unsupported: usize,

    /// Verifications whose every claim ended SUPPORTED
    pub validated: usize,

    /// Verifications flagged as having no claims
    pub no_claims: usize,

    /// Verifications with at least one unconfirmed claim
    pub partially_checked: usize,

    /// Reviewer/checker disagreements across all verifications
    pub disagreements: usize,
}

impl AggregateReport {
    /// Compute the report from log entries
    ///
    /// Scores are summed as integer tenths, so the result does not depend on
    /// entry order. An empty log gives a zeroed report.
    pub fn from_entries(entries: &[QualityLogEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let tenths: Vec<i64> = entries.iter().map(|e| to_tenths(e.fidelity_score)).collect();
        let n = entries.len() as i64;
        let sum: i64 = tenths.iter().sum();
        let mean_tenths = (2 * sum + n).div_euclid(2 * n);

        Self {
            queries: entries.len(),
            mean_score: mean_tenths as f64 / 10.0,
            min_score: tenths.iter().copied().min().unwrap_or(0) as f64 / 10.0,
            max_score: tenths.iter().copied().max().unwrap_or(0) as f64 / 10.0,
            total_claims: entries.iter().map(|e| e.total_claims).sum(),
            total_supported: entries.iter().map(|e| e.supported).sum(),
            total_unsupported: entries.iter().map(|e| e.unsupported).sum(),
            validated: entries.iter().filter(|e| e.validated).count(),
            no_claims: entries.iter().filter(|e| e.no_claims).count(),
            partially_checked: entries.iter().filter(|e| e.unconfirmed > 0).count(),
            disagreements: entries.iter().map(|e| e.disagreements).sum(),
        }
    }

    /// Human-readable report
    pub fn summary(&self) -> String {
        if self.queries == 0 {
            return "No entries in the quality log.".to_string();
        }

        let lines = [
            "Aggregate Quality Report".to_string(),
            "========================".to_string(),
            format!("Queries analysed:     {}", self.queries),
            format!("Mean fidelity:        {:.1}%", self.mean_score),
            format!("Min fidelity:         {:.1}%", self.min_score),
            format!("Max fidelity:         {:.1}%", self.max_score),
            format!("Total claims:         {}", self.total_claims),
            format!("Supported claims:     {}", self.total_supported),
            format!("Unsupported claims:   {}", self.total_unsupported),
            format!("Validated queries:    {}/{}", self.validated, self.queries),
            format!("No-claim queries:     {}", self.no_claims),
            format!("Partially checked:    {}", self.partially_checked),
            format!("Disagreements:        {}", self.disagreements),
        ];
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn entry(score: f64, total: usize, supported: usize) -> QualityLogEntry {
        QualityLogEntry {
            timestamp: Utc::now(),
            query: "q".to_string(),
            fidelity_score: score,
            total_claims: total,
            supported,
            unsupported: total - supported,
            unknown: 0,
            validated: supported == total && total > 0,
            no_claims: total == 0,
            malformed_review: false,
            unconfirmed: 0,
            disagreements: 0,
            problems: Vec::new(),
            verified_entities: Vec::new(),
            missing_entities: Vec::new(),
            reviewer_score: None,
            analyst_chars: 0,
            reviewer_chars: 0,
        }
    }

    #[test]
    fn test_empty_log() {
        let report = AggregateReport::from_entries(&[]);
        assert_eq!(report, AggregateReport::default());
        assert!(report.summary().contains("No entries"));
    }

    #[test]
    fn test_aggregates() {
        let entries = vec![entry(87.5, 8, 7), entry(100.0, 7, 7), entry(0.0, 0, 0)];
        let report = AggregateReport::from_entries(&entries);

        assert_eq!(report.queries, 3);
        assert_eq!(report.mean_score, 62.5);
        assert_eq!(report.min_score, 0.0);
        assert_eq!(report.max_score, 100.0);
        assert_eq!(report.total_claims, 15);
        assert_eq!(report.total_supported, 14);
        assert_eq!(report.total_unsupported, 1);
        assert_eq!(report.validated, 1);
        assert_eq!(report.no_claims, 1);
        assert!(report.summary().contains("Validated queries:    1/3"));
    }

    proptest! {
        #[test]
        fn prop_order_independent(scores in prop::collection::vec(0u32..=1000, 1..40)) {
            let entries: Vec<QualityLogEntry> = scores
                .iter()
                .map(|t| entry(*t as f64 / 10.0, 1, 1))
                .collect();
            let mut reversed = entries.clone();
            reversed.reverse();

            let a = AggregateReport::from_entries(&entries);
            let b = AggregateReport::from_entries(&reversed);
            prop_assert_eq!(a.mean_score, b.mean_score);
            prop_assert!(a.min_score <= a.mean_score && a.mean_score <= a.max_score);
        }
    }
}
