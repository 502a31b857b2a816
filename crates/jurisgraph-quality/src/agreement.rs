//! Agreement between the reviewer's own view and the reconciled score

use jurisgraph_domain::VerificationResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest difference, in points, still counted as high agreement
pub const HIGH_AGREEMENT_MAX_DIFF: f64 = 10.0;

/// Largest difference, in points, still counted as moderate agreement
pub const MODERATE_AGREEMENT_MAX_DIFF: f64 = 25.0;

/// How closely the reviewer matched the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementLevel {
    /// Within 10 points
    High,
    /// Within 25 points
    Moderate,
    /// More than 25 points apart
    Low,
}

impl fmt::Display for AgreementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AgreementLevel::High => "high",
            AgreementLevel::Moderate => "moderate",
            AgreementLevel::Low => "low",
        })
    }
}

/// Reviewer score, final score and how far apart they are
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    /// Self-reported score, or the share of reviewer-SUPPORTED claims
    pub reviewer_score: f64,
    /// Reconciled fidelity score
    pub final_score: f64,
    /// Absolute difference in points
    pub difference: f64,
    /// Bucketed difference
    pub level: AgreementLevel,
}

impl Agreement {
    /// Assess a verification result
    pub fn assess(result: &VerificationResult) -> Self {
        let reviewer_score = result
            .reviewer_score
            .unwrap_or_else(|| result.reviewer_supported_share());
        let difference = ((reviewer_score - result.fidelity_score).abs() * 10.0).round() / 10.0;
        let level = if difference <= HIGH_AGREEMENT_MAX_DIFF {
            AgreementLevel::High
        } else if difference <= MODERATE_AGREEMENT_MAX_DIFF {
            AgreementLevel::Moderate
        } else {
            AgreementLevel::Low
        };

        Self {
            reviewer_score,
            final_score: result.fidelity_score,
            difference,
            level,
        }
    }
}
