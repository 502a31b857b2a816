//! Docket numbers mentioned in free text

use jurisgraph_domain::EntityKey;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static DOCKET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:HC|RE|RHC|ADI|ADPF|MS|AgR|ED|ARE)\s*\d+(?:\.\d+)*(?:/[A-Z]{2})?)")
        .expect("docket pattern is valid")
});

/// Unique docket numbers mentioned in `text`, normalized and sorted
///
/// # Examples
///
/// ```
/// use jurisgraph_extractor::scan_dockets;
///
/// let keys = scan_dockets("O HC 161.450 e o hc161.450 citam o RE 1.513.210/SP.");
/// let keys: Vec<_> = keys.iter().map(|k| k.as_str()).collect();
/// assert_eq!(keys, vec!["HC 161.450", "RE 1.513.210/SP"]);
/// ```
pub fn scan_dockets(text: &str) -> Vec<EntityKey> {
    DOCKET
        .captures_iter(text)
        .filter_map(|caps| EntityKey::parse(&caps[1]).ok())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_ignores_unrelated_words() {
        // "REsp" and "HCL" do not start a docket number
        let keys = scan_dockets("No REsp nor HCL here, but ADPF 347 and ADI 4.983.");
        let keys: Vec<_> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["ADI 4.983", "ADPF 347"]);
    }

    #[test]
    fn test_scan_empty() {
        assert!(scan_dockets("nenhum processo").is_empty());
    }
}
