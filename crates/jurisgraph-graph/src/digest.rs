//! Decision digest - a compact textual view of the whole graph
//!
//! Used as context for the analyst and reviewer prompts.

use crate::queries::{self, LIST_SEPARATOR};
use jurisgraph_domain::traits::{Bindings, GraphError, GraphRow, GraphStore};

/// One decision with its relations, flattened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionSummary {
    /// Docket number
    pub docket: String,
    /// Procedural class
    pub class: String,
    /// Judgment date
    pub judged_on: String,
    /// Rapporteur
    pub rapporteur: String,
    /// Topic descriptions
    pub topics: Vec<String>,
    /// Cited articles
    pub articles: Vec<String>,
    /// Cited precedents
    pub precedents: Vec<String>,
}

fn split(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl DecisionSummary {
    fn from_row(row: &GraphRow) -> Self {
        let text = |c: &str| row.get(c).unwrap_or_default().to_string();
        Self {
            docket: text("entity"),
            class: text("class"),
            judged_on: text("judged_on"),
            rapporteur: text("rapporteur"),
            topics: split(row.get("topics")),
            articles: split(row.get("articles")),
            precedents: split(row.get("precedents")),
        }
    }
}

/// Read every decision with its relations
pub async fn decision_digest(store: &dyn GraphStore) -> Result<Vec<DecisionSummary>, GraphError> {
    let rows = store.run_read(&queries::DECISION_DIGEST, &Bindings::new()).await?;
    Ok(rows.iter().map(DecisionSummary::from_row).collect())
}

/// Render a digest as prompt context
pub fn render_digest(summaries: &[DecisionSummary]) -> String {
    if summaries.is_empty() {
        return "(knowledge graph is empty)\n".to_string();
    }

    let mut out = String::new();
    for s in summaries {
        out.push_str(&format!("- {} ({})", s.docket, s.class));
        if !s.judged_on.is_empty() {
            out.push_str(&format!(", judged {}", s.judged_on));
        }
        out.push('\n');
        if !s.rapporteur.is_empty() {
            out.push_str(&format!("  rapporteur: {}\n", s.rapporteur));
        }
        if !s.topics.is_empty() {
            out.push_str(&format!("  topics: {}\n", s.topics.join(LIST_SEPARATOR)));
        }
        if !s.articles.is_empty() {
            out.push_str(&format!("  articles: {}\n", s.articles.join(LIST_SEPARATOR)));
        }
        if !s.precedents.is_empty() {
            out.push_str(&format!("  precedents: {}\n", s.precedents.join(LIST_SEPARATOR)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decision, MemoryGraph};

    #[tokio::test]
    async fn test_digest_from_memory_graph() {
        let graph = MemoryGraph::with_decisions([Decision::new("HC 161.450", "HC")
            .with_rapporteur("Gilmar Mendes")
            .with_topic(1, "Prisão preventiva")
            .with_article("art. 312")]);

        let digest = decision_digest(&graph).await.unwrap();
        assert_eq!(digest.len(), 1);
        assert_eq!(digest[0].topics, vec!["Prisão preventiva"]);

        let text = render_digest(&digest);
        assert!(text.contains("HC 161.450 (HC)"));
        assert!(text.contains("rapporteur: Gilmar Mendes"));
        assert!(text.contains("articles: art. 312"));
    }

    #[test]
    fn test_empty_digest() {
        assert!(render_digest(&[]).contains("empty"));
    }
}
