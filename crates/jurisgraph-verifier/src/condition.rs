//! Reportable conditions and their exit codes

use serde::Serialize;
use std::fmt;

/// A degraded but non-fatal condition met while verifying
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum Condition {
    /// The reviewer enumerated no claims
    NoClaims,

    /// The reviewer output could not be parsed
    MalformedReview {
        /// Parser diagnostic
        reason: String,
    },

    /// Some graph calls failed or timed out
    GraphUnavailable {
        /// Checks that ended CHECK_UNAVAILABLE
        unavailable: usize,
        /// Checks attempted
        attempted: usize,
    },

    /// The quality record was not persisted
    LogWriteFailed {
        /// Log diagnostic
        reason: String,
    },
}

impl Condition {
    /// Process exit code for CLI callers
    pub fn exit_code(&self) -> i32 {
        match self {
            Condition::NoClaims => 2,
            Condition::GraphUnavailable { .. } => 3,
            Condition::LogWriteFailed { .. } => 4,
            Condition::MalformedReview { .. } => 5,
        }
    }

    /// Rank used to pick a single exit code; higher wins
    pub fn priority(&self) -> u8 {
        match self {
            Condition::LogWriteFailed { .. } => 4,
            Condition::GraphUnavailable { .. } => 3,
            Condition::MalformedReview { .. } => 2,
            Condition::NoClaims => 1,
        }
    }

    /// Stable name
    pub fn name(&self) -> &'static str {
        match self {
            Condition::NoClaims => "NO_CLAIMS",
            Condition::MalformedReview { .. } => "MALFORMED_REVIEW",
            Condition::GraphUnavailable { .. } => "GRAPH_UNAVAILABLE",
            Condition::LogWriteFailed { .. } => "LOG_WRITE_FAILED",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::NoClaims => f.write_str("NO_CLAIMS: reviewer listed no claims"),
            Condition::MalformedReview { reason } => write!(f, "MALFORMED_REVIEW: {}", reason),
            Condition::GraphUnavailable { unavailable, attempted } => write!(
                f,
                "GRAPH_UNAVAILABLE: {} of {} checks could not reach the graph",
                unavailable, attempted
            ),
            Condition::LogWriteFailed { reason } => write!(f, "LOG_WRITE_FAILED: {}", reason),
        }
    }
}

/// Exit code for a set of conditions: 0 when clean, else the highest-priority one
pub fn exit_code(conditions: &[Condition]) -> i32 {
    conditions
        .iter()
        .max_by_key(|c| c.priority())
        .map_or(0, Condition::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let all = [
            Condition::NoClaims,
            Condition::MalformedReview { reason: "x".into() },
            Condition::GraphUnavailable { unavailable: 1, attempted: 2 },
            Condition::LogWriteFailed { reason: "disk".into() },
        ];
        let mut codes: Vec<i32> = all.iter().map(Condition::exit_code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 4);
        assert!(!codes.contains(&0));
    }

    #[test]
    fn test_exit_code_picks_highest_priority() {
        assert_eq!(exit_code(&[]), 0);
        assert_eq!(exit_code(&[Condition::NoClaims]), 2);
        assert_eq!(
            exit_code(&[
                Condition::NoClaims,
                Condition::GraphUnavailable { unavailable: 3, attempted: 8 },
            ]),
            3
        );
        assert_eq!(
            exit_code(&[
                Condition::LogWriteFailed { reason: "disk".into() },
                Condition::GraphUnavailable { unavailable: 3, attempted: 8 },
            ]),
            4
        );
    }
}
