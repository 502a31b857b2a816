//! Negation probe
//!
//! An answer that says "there is no decision about X" is a claim about the
//! whole graph, which no per-claim template covers. The probe matches the
//! query's keywords against every decision topic; each hit becomes a
//! synthesized TOPIC claim the checker marks UNSUPPORTED.

use crate::checker::DeterministicChecker;
use jurisgraph_domain::traits::{Bindings, GraphStore};
use jurisgraph_domain::{CheckerVerdict, Claim, ClaimKind, ClaimOrigin, Verdict};
use jurisgraph_graph::queries;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info, warn};

static ABSENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)não consta|não há registro|não encontr|não foram encontrad|não exist|não possui|nenhuma decisão|nenhum registro|no record|not found|no decision|does not exist",
    )
    .expect("absence pattern is valid")
});

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "quais", "qual", "que", "como", "onde", "quando", "decisões", "decisão", "decisoes",
        "decisao", "sobre", "citam", "cita", "tratam", "trata", "são", "sao", "foram", "pode",
        "podem", "tem", "têm", "dos", "das", "com", "por", "para", "uma", "aos", "uso", "tema",
        "falam", "fala",
    ]
    .into_iter()
    .collect()
});

static SYNONYMS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let table: [(&str, &[&str]); 10] = [
        ("maconha", &["cannabis", "canábis", "marijuana", "cânhamo"]),
        ("cannabis", &["maconha", "canábis", "marijuana", "cânhamo"]),
        ("medicinal", &["medicinais", "médico", "médica", "terapêutico", "terapêutica"]),
        ("medicinais", &["medicinal", "médico", "médica", "terapêutico", "terapêutica"]),
        ("cultivo", &["plantio", "plantar", "cultivar", "plantação"]),
        ("drogas", &["entorpecentes", "narcóticos", "substâncias"]),
        ("saúde", &["sanitário", "sanitária", "médico", "médica"]),
        ("penal", &["criminal", "crime", "criminoso", "delito"]),
        ("preso", &["presa", "prisão", "detido", "detida", "encarcerado"]),
        ("liberdade", &["soltura", "solto", "livre", "liberação"]),
    ];
    table.into_iter().collect()
});

/// Words shorter than this only match exactly
const MIN_PARTIAL_LEN: usize = 4;

/// Note attached to every synthesized claim
pub const PROBE_NOTE: &str = "graph contains matching topic";

/// What the probe concluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The answer asserts no absence
    NotApplicable,

    /// The graph holds nothing matching; the answer's denial stands
    ConfirmedAbsence,

    /// The graph holds this many matching topics
    Contradicted(usize),

    /// The topic index could not be read
    Unavailable(String),
}

/// Claims and status produced by a probe run
#[derive(Debug, Clone, PartialEq)]
pub struct NegationProbe {
    /// Synthesized claims, one per matching topic
    pub claims: Vec<Claim>,

    /// Probe conclusion
    pub status: ProbeStatus,
}

impl NegationProbe {
    fn empty(status: ProbeStatus) -> Self {
        Self {
            claims: Vec::new(),
            status,
        }
    }
}

/// Whether the text asserts that something is absent from the record
pub fn asserts_absence(text: &str) -> bool {
    ABSENCE.is_match(text)
}

/// Query keywords: lower case, longer than two characters, stopwords removed
pub fn query_keywords(query: &str) -> BTreeSet<String> {
    WORD.find_iter(&query.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|w| w.chars().count() > 2 && !STOPWORDS.contains(w.as_str()))
        .collect()
}

/// Keywords plus their known synonyms
pub fn expand_synonyms(keywords: &BTreeSet<String>) -> BTreeSet<String> {
    let mut expanded = keywords.clone();
    for word in keywords {
        if let Some(synonyms) = SYNONYMS.get(word.as_str()) {
            expanded.extend(synonyms.iter().map(|s| s.to_string()));
        }
    }
    expanded
}

/// Whether a topic description shares a keyword with the query
///
/// Exact word overlap counts, as does containment either way between words of
/// at least four characters ("medicinal" against "medicinais").
pub fn topic_matches(keywords: &BTreeSet<String>, topic: &str) -> bool {
    let lowered = topic.to_lowercase();
    let words: HashSet<&str> = WORD.find_iter(&lowered).map(|m| m.as_str()).collect();

    if keywords.iter().any(|k| words.contains(k.as_str())) {
        return true;
    }
    let long = |w: &str| w.chars().count() >= MIN_PARTIAL_LEN;
    keywords
        .iter()
        .filter(|k| long(k))
        .any(|k| {
            words
                .iter()
                .filter(|w| long(w))
                .any(|w| w.contains(k.as_str()) || k.contains(w))
        })
}

impl<G: GraphStore + ?Sized> DeterministicChecker<G> {
    /// Probe the graph for topics the answer claims do not exist
    ///
    /// Synthesized claims are numbered from `next_index`. They carry reviewer
    /// verdict UNKNOWN and checker verdict UNSUPPORTED, so reconciliation
    /// records each as a disagreement.
    pub async fn probe_negation(&self, query: &str, answer: &str, next_index: usize) -> NegationProbe {
        if !self.config().negation_probe || !asserts_absence(answer) {
            return NegationProbe::empty(ProbeStatus::NotApplicable);
        }

        let keywords = expand_synonyms(&query_keywords(query));
        if keywords.is_empty() {
            debug!("answer asserts absence but the query has no keywords");
            return NegationProbe::empty(ProbeStatus::ConfirmedAbsence);
        }

        let rows = match self.read(&queries::TOPIC_INDEX, &Bindings::new()).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "negation probe unavailable");
                return NegationProbe::empty(ProbeStatus::Unavailable(e.to_string()));
            }
        };

        let claims: Vec<Claim> = rows
            .iter()
            .filter_map(|row| Some((row.get("entity")?, row.get("value")?)))
            .filter(|(_, topic)| topic_matches(&keywords, topic))
            .enumerate()
            .map(|(offset, (entity, topic))| {
                let mut claim = Claim::new(
                    next_index + offset,
                    ClaimKind::Topic,
                    Verdict::Unknown,
                    format!("answer denies existence, but {} deals with: {}", entity, topic),
                )
                .with_entities([entity])
                .with_value(topic)
                .with_origin(ClaimOrigin::NegationProbe);
                claim.checker_verdict = Some(CheckerVerdict::Unsupported);
                claim.checker_note = Some(PROBE_NOTE.to_string());
                claim
            })
            .collect();

        if claims.is_empty() {
            info!("negation probe confirmed absence");
            NegationProbe::empty(ProbeStatus::ConfirmedAbsence)
        } else {
            info!(matches = claims.len(), "negation probe contradicted the answer");
            NegationProbe {
                status: ProbeStatus::Contradicted(claims.len()),
                claims,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asserts_absence() {
        assert!(asserts_absence("Não consta nas 12 decisões do acervo."));
        assert!(asserts_absence("não foram encontradas decisões sobre o tema"));
        assert!(asserts_absence("Nenhuma decisão trata disso"));
        assert!(!asserts_absence("O HC 161.450 foi relatado por Cármen Lúcia."));
    }

    #[test]
    fn test_query_keywords_drop_stopwords_and_short_words() {
        let keywords = query_keywords("Quais decisões tratam do cultivo de maconha?");
        let expected: BTreeSet<String> = ["cultivo", "maconha"].into_iter().map(String::from).collect();
        assert_eq!(keywords, expected);
    }

    #[test]
    fn test_synonym_expansion() {
        let keywords = expand_synonyms(&query_keywords("uso medicinal de cannabis"));
        assert!(keywords.contains("maconha"));
        assert!(keywords.contains("terapêutico"));
        assert!(keywords.contains("medicinal"));
    }

    #[test]
    fn test_topic_matching() {
        let keywords = expand_synonyms(&query_keywords("cannabis medicinal"));
        assert!(topic_matches(&keywords, "Importação de maconha para fins terapêuticos"));
        assert!(topic_matches(&keywords, "Produtos medicinais à base de canabidiol"));
        assert!(!topic_matches(&keywords, "Licença-maternidade de servidora gestante"));
    }

    #[test]
    fn test_short_words_need_exact_match() {
        let keywords: BTreeSet<String> = ["mar".to_string()].into_iter().collect();
        assert!(!topic_matches(&keywords, "Marinha mercante"));
        assert!(topic_matches(&keywords, "Mar territorial e a União"));
    }
}
