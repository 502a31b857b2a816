//! Deciding whether a returned row backs the asserted value

use jurisgraph_domain::traits::GraphRow;
use jurisgraph_domain::ClaimKind;

/// Honorifics dropped before comparing justice names
const HONORIFICS: &[&str] = &["min.", "ministro", "ministra", "justice"];

/// Whether `row` supports a claim of `kind` asserting `value`
///
/// A claim without a value is backed by any row of its template.
pub fn row_matches(kind: ClaimKind, value: Option<&str>, row: &GraphRow, min_topic_overlap: usize) -> bool {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return true;
    };
    let found = row.get("value").unwrap_or_default();

    match kind {
        ClaimKind::Attribution => names_match(value, found),
        ClaimKind::Citation => articles_match(value, found),
        ClaimKind::Topic => topics_match(value, found, min_topic_overlap),
        ClaimKind::Relation | ClaimKind::Other => true,
    }
}

fn names_match(claimed: &str, stored: &str) -> bool {
    let claimed = strip_honorifics(claimed);
    let stored = strip_honorifics(stored);
    !claimed.is_empty() && !stored.is_empty() && (stored.contains(&claimed) || claimed.contains(&stored))
}

fn strip_honorifics(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .filter(|w| !HONORIFICS.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn article_number(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    Some(&rest[..end])
}

fn articles_match(claimed: &str, stored: &str) -> bool {
    match (article_number(claimed), article_number(stored)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn words(text: &str) -> std::collections::BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

fn topics_match(claimed: &str, stored: &str, min_overlap: usize) -> bool {
    let claimed_lower = claimed.to_lowercase();
    let stored_lower = stored.to_lowercase();
    if stored_lower.is_empty() {
        return false;
    }
    if stored_lower.contains(&claimed_lower) || claimed_lower.contains(&stored_lower) {
        return true;
    }
    words(claimed).intersection(&words(stored)).count() >= min_overlap
}
