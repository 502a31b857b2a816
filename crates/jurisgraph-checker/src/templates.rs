//! Claim kind to template dispatch
//!
//! Each kind is bound to zero or one read template. `OTHER` has none, so the
//! checker abstains on it.

use jurisgraph_domain::traits::QueryTemplate;
use jurisgraph_domain::ClaimKind;
use jurisgraph_graph::queries;

/// Template table, one row per claim kind
pub const TEMPLATE_TABLE: [(ClaimKind, Option<&QueryTemplate>); 5] = [
    (ClaimKind::Attribution, Some(&queries::ATTRIBUTION)),
    (ClaimKind::Topic, Some(&queries::TOPIC)),
    (ClaimKind::Citation, Some(&queries::CITATION)),
    (ClaimKind::Relation, Some(&queries::RELATION)),
    (ClaimKind::Other, None),
];

/// Template used to check a claim kind, if any
pub fn template_for(kind: ClaimKind) -> Option<&'static QueryTemplate> {
    TEMPLATE_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .and_then(|(_, template)| *template)
}

/// Entity keys a kind needs before its template can be bound
pub fn required_keys(kind: ClaimKind) -> usize {
    match kind {
        ClaimKind::Relation => 2,
        _ => 1,
    }
}
