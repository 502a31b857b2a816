//! Entity keys - normalized docket numbers used to bind template queries

use std::fmt;
use thiserror::Error;

/// Court classes accepted as the prefix of a docket number
pub const DOCKET_CLASSES: &[&str] = &["HC", "RE", "RHC", "ADI", "ADPF", "MS", "AGR", "ED", "ARE"];

/// Reasons a docket number is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityKeyError {
    /// Nothing to parse
    #[error("empty entity key")]
    Empty,

    /// Prefix is not a known court class
    #[error("unknown docket class in '{0}'")]
    UnknownClass(String),

    /// Number part is not digit groups separated by dots, with an optional `/UF` suffix
    #[error("malformed docket number in '{0}'")]
    MalformedNumber(String),
}

/// A normalized docket number such as `HC 161.450` or `RE 1.513.210/SP`
///
/// Normalization upper-cases the key and leaves exactly one space between the
/// class and the number, so `hc161.450` and `HC  161.450` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityKey(String);

impl EntityKey {
    /// Parse and normalize a docket number
    ///
    /// # Examples
    ///
    /// ```
    /// use jurisgraph_domain::EntityKey;
    ///
    /// let key = EntityKey::parse("hc161.450").unwrap();
    /// assert_eq!(key.as_str(), "HC 161.450");
    /// assert_eq!(key.class(), "HC");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, EntityKeyError> {
        let compact: String = raw.split_whitespace().collect::<Vec<_>>().join("");
        if compact.is_empty() {
            return Err(EntityKeyError::Empty);
        }
        let upper = compact.to_uppercase();

        let split = upper
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| EntityKeyError::MalformedNumber(raw.to_string()))?;
        let (class, number) = upper.split_at(split);

        if !DOCKET_CLASSES.contains(&class) {
            return Err(EntityKeyError::UnknownClass(raw.to_string()));
        }
        if !is_docket_number(number) {
            return Err(EntityKeyError::MalformedNumber(raw.to_string()));
        }

        Ok(Self(format!("{} {}", class, number)))
    }

    /// The normalized key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The court class prefix (`HC`, `RE`, ...)
    pub fn class(&self) -> &str {
        self.0.split(' ').next().unwrap_or_default()
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EntityKey {
    type Err = EntityKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// `161.450`, `1.513.210/SP`, `4983`
fn is_docket_number(number: &str) -> bool {
    let (digits, state) = match number.split_once('/') {
        Some((digits, state)) => (digits, Some(state)),
        None => (number, None),
    };

    if let Some(state) = state {
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_uppercase()) {
            return false;
        }
    }

    !digits.is_empty()
        && digits
            .split('.')
            .all(|group| !group.is_empty() && group.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalization() {
        assert_eq!(EntityKey::parse("HC 161.450").unwrap().as_str(), "HC 161.450");
        assert_eq!(EntityKey::parse("hc   161.450").unwrap().as_str(), "HC 161.450");
        assert_eq!(EntityKey::parse("re1.513.210/sp").unwrap().as_str(), "RE 1.513.210/SP");
        assert_eq!(EntityKey::parse("ADI 4983").unwrap().class(), "ADI");
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(EntityKey::parse("   "), Err(EntityKeyError::Empty));
        assert!(matches!(EntityKey::parse("XYZ 123"), Err(EntityKeyError::UnknownClass(_))));
        assert!(matches!(EntityKey::parse("HC"), Err(EntityKeyError::MalformedNumber(_))));
        assert!(matches!(EntityKey::parse("HC 12..3"), Err(EntityKeyError::MalformedNumber(_))));
        assert!(matches!(EntityKey::parse("HC 123/S"), Err(EntityKeyError::MalformedNumber(_))));
        assert!(matches!(EntityKey::parse("HC 12a"), Err(EntityKeyError::MalformedNumber(_))));
    }

    proptest! {
        #[test]
        fn prop_parse_is_idempotent(
            class in prop::sample::select(DOCKET_CLASSES),
            groups in prop::collection::vec(1u32..1000, 1..4),
        ) {
            let number = groups.iter().map(|g| g.to_string()).collect::<Vec<_>>().join(".");
            let key = EntityKey::parse(&format!("{}{}", class.to_lowercase(), number)).unwrap();
            let again = EntityKey::parse(key.as_str()).unwrap();
            prop_assert_eq!(key, again);
        }
    }
}
