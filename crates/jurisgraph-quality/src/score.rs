//! Fidelity scoring

use jurisgraph_domain::{Claim, Verdict};

/// Claim counts by final verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Number of claims
    pub total: usize,
    /// Final verdict SUPPORTED
    pub supported: usize,
    /// Final verdict UNSUPPORTED
    pub unsupported: usize,
    /// Final verdict UNKNOWN, or not reconciled
    pub unknown: usize,
}

impl Tally {
    /// Count claims by final verdict
    pub fn of(claims: &[Claim]) -> Self {
        let mut tally = Self {
            total: claims.len(),
            ..Self::default()
        };
        for claim in claims {
            match claim.final_verdict {
                Some(Verdict::Supported) => tally.supported += 1,
                Some(Verdict::Unsupported) => tally.unsupported += 1,
                Some(Verdict::Unknown) | None => tally.unknown += 1,
            }
        }
        tally
    }

    /// Fidelity score of this tally
    pub fn score(&self) -> f64 {
        fidelity_score(self.supported, self.total)
    }
}

/// Score in integer tenths of a percent, rounded half up
///
/// Zero claims score zero; a missing denominator never earns full credit.
pub fn score_tenths(supported: usize, total: usize) -> u64 {
    if total == 0 {
        return 0;
    }
    let supported = supported.min(total) as u64;
    let total = total as u64;
    (supported * 2000 + total) / (2 * total)
}

/// `round(supported / total * 100, 1)`, or 0 when there are no claims
pub fn fidelity_score(supported: usize, total: usize) -> f64 {
    score_tenths(supported, total) as f64 / 10.0
}

/// Convert a one-decimal score back to integer tenths
pub(crate) fn to_tenths(score: f64) -> i64 {
    (score * 10.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use jurisgraph_domain::ClaimKind;
    use proptest::prelude::*;

    #[test]
    fn test_known_scores() {
        assert_eq!(fidelity_score(7, 8), 87.5);
        assert_eq!(fidelity_score(2, 3), 66.7);
        assert_eq!(fidelity_score(1, 3), 33.3);
        assert_eq!(fidelity_score(7, 7), 100.0);
        assert_eq!(fidelity_score(0, 5), 0.0);
    }

    #[test]
    fn test_zero_claims_is_zero() {
        assert_eq!(fidelity_score(0, 0), 0.0);
    }

    #[test]
    fn test_tally() {
        let mut claims: Vec<Claim> = (1..=4)
            .map(|i| Claim::new(i, ClaimKind::Other, Verdict::Supported, "c"))
            .collect();
        claims[0].final_verdict = Some(Verdict::Supported);
        claims[1].final_verdict = Some(Verdict::Unsupported);
        claims[2].final_verdict = Some(Verdict::Unknown);

        let tally = Tally::of(&claims);
        assert_eq!(tally.total, 4);
        assert_eq!(tally.supported, 1);
        assert_eq!(tally.unsupported, 1);
        assert_eq!(tally.unknown, 2);
        assert_eq!(tally.score(), 25.0);
    }

    proptest! {
        #[test]
        fn prop_score_in_range(total in 0usize..500, supported in 0usize..500) {
            let score = fidelity_score(supported, total);
            prop_assert!((0.0..=100.0).contains(&score));
            prop_assert_eq!(to_tenths(score) as u64, score_tenths(supported, total));
        }

        #[test]
        fn prop_score_matches_rounded_ratio(total in 1usize..500, frac in 0.0f64..=1.0) {
            let supported = (total as f64 * frac).floor() as usize;
            let expected = (supported as f64 / total as f64 * 1000.0).round() / 10.0;
            prop_assert!((fidelity_score(supported, total) - expected).abs() < 0.051);
        }
    }
}
