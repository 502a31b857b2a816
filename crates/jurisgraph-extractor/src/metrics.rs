//! Self-reported metrics block in reviewer output
//!
//! Reviewers may close their output with a fenced block:
//!
//! ~~~text
//! ```quality_metrics
//! {"validated": true, "fidelity_score": 87.5, "total_claims": 8, ...}
//! ```
//! ~~~
//!
//! The Portuguese field names used by earlier reviewer prompts are accepted too.
//! Everything here is advisory: a missing or broken block is `None`, never an
//! error, and the score actually recorded is always the reconciled one.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

static METRICS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```quality_metrics\s*\n?(.*?)\n?```").expect("metrics pattern is valid")
});

/// Metrics the reviewer reported about its own review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewerMetrics {
    /// Reviewer considers the answer validated
    #[serde(alias = "validado")]
    pub validated: bool,

    /// Reviewer's own fidelity score
    #[serde(alias = "score_fidelidade")]
    pub fidelity_score: f64,

    /// Claims the reviewer counted
    #[serde(alias = "total_afirmacoes")]
    pub total_claims: u32,

    /// Claims the reviewer confirmed
    #[serde(alias = "verificadas_ok")]
    pub supported: u32,

    /// Claims the reviewer could not ground
    #[serde(alias = "sem_fundamentacao")]
    pub unsupported: u32,

    /// Dockets the reviewer looked up
    #[serde(alias = "processos_verificados")]
    pub entities_checked: Vec<String>,

    /// Problems the reviewer listed
    #[serde(alias = "problemas")]
    pub problems: Vec<String>,
}

/// Extract the `quality_metrics` block, if present and well formed
pub fn parse_reviewer_metrics(review: &str) -> Option<ReviewerMetrics> {
    let caps = METRICS_BLOCK.captures(review)?;
    match serde_json::from_str::<ReviewerMetrics>(caps[1].trim()) {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            debug!(error = %e, "ignoring unreadable quality_metrics block");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_english_block() {
        let review = "text\n```quality_metrics\n{\"validated\": true, \"fidelity_score\": 87.5, \"total_claims\": 8}\n```";
        let m = parse_reviewer_metrics(review).unwrap();
        assert!(m.validated);
        assert_eq!(m.fidelity_score, 87.5);
        assert_eq!(m.total_claims, 8);
        assert!(m.problems.is_empty());
    }

    #[test]
    fn test_parse_portuguese_block() {
        let review = r#"```quality_metrics
{
  "validado": false,
  "score_fidelidade": 50.0,
  "total_afirmacoes": 4,
  "verificadas_ok": 2,
  "sem_fundamentacao": 2,
  "processos_verificados": ["HC 161.450"],
  "problemas": ["relator incorreto"],
  "extra": "ignored"
}
```"#;
        let m = parse_reviewer_metrics(review).unwrap();
        assert_eq!(m.supported, 2);
        assert_eq!(m.entities_checked, vec!["HC 161.450"]);
        assert_eq!(m.problems, vec!["relator incorreto"]);
    }

    #[test]
    fn test_missing_or_broken_block() {
        assert_eq!(parse_reviewer_metrics("no block here"), None);
        assert_eq!(parse_reviewer_metrics("```quality_metrics\n{not json\n```"), None);
    }
}
