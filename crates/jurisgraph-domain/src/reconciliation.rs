//! Reconciliation of reviewer and checker verdicts
//!
//! Precedence, evaluated in order:
//! 1. Checker unavailable: the reviewer verdict stands, flagged unconfirmed.
//! 2. Checker abstained: the reviewer verdict stands, no flag.
//! 3. Checker agrees: the shared verdict.
//! 4. Checker disagrees: the checker verdict, recorded as a disagreement.

use crate::claim::Claim;
use crate::problem::Problem;
use crate::verdict::{CheckerVerdict, Verdict};

/// How a final verdict was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Both verifiers agreed
    Reinforced,

    /// The checker overruled the reviewer
    Overruled,

    /// The checker abstained
    ReviewerOnly,

    /// The checker could not reach the graph
    Unconfirmed,
}

/// Final verdict for one claim plus how it was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Adjudicated verdict
    pub final_verdict: Verdict,
    /// Which rule produced it
    pub outcome: Outcome,
}

/// Reconcile a single pair of verdicts
///
/// Total over every input pair and free of side effects.
///
/// # Examples
///
/// ```
/// use jurisgraph_domain::{reconcile, CheckerVerdict, Outcome, Verdict};
///
/// let r = reconcile(Verdict::Supported, Some(CheckerVerdict::Unsupported));
/// assert_eq!(r.final_verdict, Verdict::Unsupported);
/// assert_eq!(r.outcome, Outcome::Overruled);
/// ```
pub fn reconcile(reviewer: Verdict, checker: Option<CheckerVerdict>) -> Resolution {
    match checker {
        Some(CheckerVerdict::Unavailable) => Resolution {
            final_verdict: reviewer,
            outcome: Outcome::Unconfirmed,
        },
        None => Resolution {
            final_verdict: reviewer,
            outcome: Outcome::ReviewerOnly,
        },
        Some(verdict) => {
            // Supported and Unsupported always carry an opinion
            let opinion = verdict.opinion().unwrap_or(reviewer);
            if opinion == reviewer {
                Resolution {
                    final_verdict: opinion,
                    outcome: Outcome::Reinforced,
                }
            } else {
                Resolution {
                    final_verdict: opinion,
                    outcome: Outcome::Overruled,
                }
            }
        }
    }
}

/// Reconcile every claim in place and return the problems raised
///
/// Each overruled claim yields exactly one disagreement entry and each
/// unconfirmed claim exactly one unconfirmed entry. Re-running on the same
/// claims produces the same final verdicts and problems.
pub fn reconcile_claims(claims: &mut [Claim]) -> Vec<Problem> {
    let mut problems = Vec::new();

    for claim in claims.iter_mut() {
        let resolution = reconcile(claim.reviewer_verdict, claim.checker_verdict);
        claim.final_verdict = Some(resolution.final_verdict);

        match resolution.outcome {
            Outcome::Overruled => {
                if let Some(checker) = claim.checker_verdict {
                    problems.push(Problem::Disagreement {
                        claim: claim.label(),
                        reviewer: claim.reviewer_verdict,
                        checker,
                        note: claim.checker_note.clone(),
                    });
                }
            }
            Outcome::Unconfirmed => problems.push(Problem::Unconfirmed {
                claim: claim.label(),
            }),
            Outcome::Reinforced | Outcome::ReviewerOnly => {}
        }
    }

    problems
}
