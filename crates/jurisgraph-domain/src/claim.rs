//! Claim module - atomic factual assertions extracted from an answer

use crate::entity::{EntityKey, EntityKeyError};
use crate::verdict::{CheckerVerdict, Verdict};
use std::fmt;

/// Unique identifier for a claim based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable without coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(u128);

impl ClaimId {
    /// Generate a new UUIDv7-based ClaimId
    ///
    /// # Examples
    ///
    /// ```
    /// use jurisgraph_domain::ClaimId;
    ///
    /// let id = ClaimId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ClaimId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ClaimId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for ClaimId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// What a claim asserts, which decides the deterministic template used to check it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimKind {
    /// A decision was reported by a given justice (RELATADO_POR)
    Attribution,

    /// A decision deals with a general-repercussion topic (TRATA_DE)
    Topic,

    /// A decision cites a constitutional article (CITA_ARTIGO)
    Citation,

    /// Two decisions are connected through the graph
    Relation,

    /// Anything else; never checked deterministically
    Other,
}

impl ClaimKind {
    /// All kinds, in reporting order
    pub const ALL: [ClaimKind; 5] = [
        ClaimKind::Attribution,
        ClaimKind::Topic,
        ClaimKind::Citation,
        ClaimKind::Relation,
        ClaimKind::Other,
    ];

    /// Get the kind name as written in reviewer output
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimKind::Attribution => "ATTRIBUTION",
            ClaimKind::Topic => "TOPIC",
            ClaimKind::Citation => "CITATION",
            ClaimKind::Relation => "RELATION",
            ClaimKind::Other => "OTHER",
        }
    }

    /// Parse a kind, accepting the Portuguese aliases reviewers tend to use
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ATTRIBUTION" | "RELATOR" => Some(ClaimKind::Attribution),
            "TOPIC" | "TEMA" => Some(ClaimKind::Topic),
            "CITATION" | "ARTIGO" => Some(ClaimKind::Citation),
            "RELATION" | "PRECEDENTE" => Some(ClaimKind::Relation),
            "OTHER" | "OUTRO" => Some(ClaimKind::Other),
            _ => None,
        }
    }
}

impl std::str::FromStr for ClaimKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid claim kind: {}", s))
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a claim came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimOrigin {
    /// Enumerated by the reviewer
    Reviewer,

    /// Stand-in for the whole answer when the review yielded nothing usable
    Fallback,

    /// Synthesized when the answer denies something the graph contains
    NegationProbe,
}

/// An atomic factual assertion with its verdicts
///
/// `reviewer_verdict` is always set. `checker_verdict` stays `None` when the
/// checker abstains. `final_verdict` is written once, by reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,

    /// 1-based position in the claim sequence
    pub index: usize,

    /// Source text span or paraphrase
    pub text: String,

    /// Referenced entity keys, as written by the reviewer
    pub entities: Vec<String>,

    /// Asserted value (rapporteur, article, topic), if any
    pub value: Option<String>,

    /// What the claim asserts
    pub kind: ClaimKind,

    /// Provenance of the claim
    pub origin: ClaimOrigin,

    /// Verdict from the language-model reviewer
    pub reviewer_verdict: Verdict,

    /// Verdict from the deterministic checker, `None` when it abstained
    pub checker_verdict: Option<CheckerVerdict>,

    /// Free-form detail left by the checker (for example, a missing entity)
    pub checker_note: Option<String>,

    /// Adjudicated verdict
    pub final_verdict: Option<Verdict>,
}

impl Claim {
    /// Create an unchecked claim
    pub fn new(
        index: usize,
        kind: ClaimKind,
        reviewer_verdict: Verdict,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: ClaimId::new(),
            index,
            text: text.into(),
            entities: Vec::new(),
            value: None,
            kind,
            origin: ClaimOrigin::Reviewer,
            reviewer_verdict,
            checker_verdict: None,
            checker_note: None,
            final_verdict: None,
        }
    }

    /// Set the referenced entity keys
    pub fn with_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities = entities.into_iter().map(Into::into).collect();
        self
    }

    /// Set the asserted value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the origin
    pub fn with_origin(mut self, origin: ClaimOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Parse every referenced entity key; fails on the first malformed one
    pub fn entity_keys(&self) -> Result<Vec<EntityKey>, EntityKeyError> {
        self.entities.iter().map(|e| EntityKey::parse(e)).collect()
    }

    /// Short label used in problem entries
    pub fn label(&self) -> String {
        let mut label = format!("claim {} [{}]", self.index, self.kind);
        if !self.entities.is_empty() {
            label.push(' ');
            label.push_str(&self.entities.join(", "));
        }
        label
    }
}
