//! Human-readable verification summary

use crate::agreement::Agreement;
use jurisgraph_domain::VerificationResult;

const RULE: &str = "==================================================";

/// Render a verification result for people
///
/// Counts are always shown, including claims the checker could not reach.
pub fn render_summary(result: &VerificationResult) -> String {
    let status = if result.is_validated() {
        "validated"
    } else if result.no_claims {
        "no claims"
    } else {
        "problems found"
    };

    let mut lines = vec![
        RULE.to_string(),
        format!(
            "Quality score: {:.1}% ({}/{} claims supported)",
            result.fidelity_score, result.supported, result.total
        ),
        format!("   Status: {}", status),
        format!(
            "   Unsupported: {}  Unknown: {}  Unconfirmed: {}",
            result.unsupported,
            result.unknown(),
            result.unconfirmed()
        ),
    ];

    let verified = if result.verified_entities.is_empty() {
        "N/A".to_string()
    } else {
        result.verified_entities.join(", ")
    };
    lines.push(format!("   Entities verified: {}", verified));
    if !result.missing_entities.is_empty() {
        lines.push(format!("   Entities not found: {}", result.missing_entities.join(", ")));
    }

    let agreement = Agreement::assess(result);
    lines.push(format!(
        "   Reviewer agreement: {} (reviewer {:.1}%, final {:.1}%)",
        agreement.level, agreement.reviewer_score, agreement.final_score
    ));

    if !result.problems.is_empty() {
        lines.push("   Problems:".to_string());
        lines.extend(result.problems.iter().map(|p| format!("     - {}", p)));
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}
