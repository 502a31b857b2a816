//! Problem entries recorded for human review

use crate::verdict::{CheckerVerdict, Verdict};
use std::fmt;

/// A flagged problem on a verification
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// The checker overruled the reviewer
    Disagreement {
        /// Label of the claim
        claim: String,
        /// What the reviewer said
        reviewer: Verdict,
        /// What the checker said
        checker: CheckerVerdict,
        /// Checker detail, such as a missing entity
        note: Option<String>,
    },

    /// The checker could not reach the graph; the reviewer verdict stands alone
    Unconfirmed {
        /// Label of the claim
        claim: String,
    },

    /// Reviewer output could not be parsed
    MalformedReview {
        /// Parser diagnostic
        reason: String,
    },

    /// The reviewer enumerated no claims
    NoClaims,

    /// The answer denies something but the graph could not be asked
    NegationUnchecked {
        /// Store diagnostic
        reason: String,
    },
}

impl Problem {
    /// Whether this entry records a reviewer/checker disagreement
    pub fn is_disagreement(&self) -> bool {
        matches!(self, Problem::Disagreement { .. })
    }

    /// Whether this entry marks a claim as unconfirmed by the checker
    pub fn is_unconfirmed(&self) -> bool {
        matches!(self, Problem::Unconfirmed { .. })
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Disagreement { claim, reviewer, checker, note } => {
                write!(f, "{}: reviewer said {}, checker said {}", claim, reviewer, checker)?;
                if let Some(note) = note {
                    write!(f, " ({})", note)?;
                }
                Ok(())
            }
            Problem::Unconfirmed { claim } => {
                write!(f, "{}: unconfirmed by checker (graph unavailable)", claim)
            }
            Problem::MalformedReview { reason } => write!(f, "malformed review: {}", reason),
            Problem::NoClaims => f.write_str("no claims extracted from review"),
            Problem::NegationUnchecked { reason } => {
                write!(f, "answer denies existence but graph could not be checked: {}", reason)
            }
        }
    }
}
