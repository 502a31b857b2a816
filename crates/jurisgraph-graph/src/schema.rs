//! Graph schema and ingestion
//!
//! ```text
//! (:Processo_STF {numero, classe, voto_texto, dispositivo_texto, data_julgamento})
//! (:Ministro_Relator {nome})
//! (:Tema_Repercussao_Geral {numero, descricao})
//! (:Artigo_Constitucional {artigo, descricao})
//!
//! (Processo_STF)-[:RELATADO_POR]->(Ministro_Relator)
//! (Processo_STF)-[:TRATA_DE]->(Tema_Repercussao_Geral)
//! (Processo_STF)-[:CITA_ARTIGO]->(Artigo_Constitucional)
//! (Processo_STF)-[:CITA_PRECEDENTE]->(Processo_STF)
//! ```

use jurisgraph_domain::traits::{Bindings, GraphError, GraphStore};
use jurisgraph_domain::{EntityKey, EntityKeyError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Constraints and indexes created before ingestion
pub const CONSTRAINTS_AND_INDEXES: &[&str] = &[
    "CREATE CONSTRAINT processo_numero IF NOT EXISTS FOR (p:Processo_STF) REQUIRE p.numero IS UNIQUE",
    "CREATE CONSTRAINT ministro_nome IF NOT EXISTS FOR (m:Ministro_Relator) REQUIRE m.nome IS UNIQUE",
    "CREATE CONSTRAINT tema_numero IF NOT EXISTS FOR (t:Tema_Repercussao_Geral) REQUIRE t.numero IS UNIQUE",
    "CREATE CONSTRAINT artigo_id IF NOT EXISTS FOR (a:Artigo_Constitucional) REQUIRE a.artigo IS UNIQUE",
    "CREATE INDEX processo_classe IF NOT EXISTS FOR (p:Processo_STF) ON (p.classe)",
    "CREATE INDEX processo_data IF NOT EXISTS FOR (p:Processo_STF) ON (p.data_julgamento)",
];

const MERGE_DECISION: &str = "MERGE (p:Processo_STF {numero: $numero}) \
     SET p.classe = $classe, p.voto_texto = $voto, \
     p.dispositivo_texto = $dispositivo, p.data_julgamento = $data";

const MERGE_RAPPORTEUR: &str = "MERGE (m:Ministro_Relator {nome: $nome}) \
     WITH m MATCH (p:Processo_STF {numero: $numero}) \
     MERGE (p)-[:RELATADO_POR]->(m)";

const MERGE_TOPIC: &str = "MERGE (t:Tema_Repercussao_Geral {numero: $tema_numero}) \
     SET t.descricao = $descricao \
     WITH t MATCH (p:Processo_STF {numero: $numero}) \
     MERGE (p)-[:TRATA_DE]->(t)";

const MERGE_ARTICLE: &str = "MERGE (a:Artigo_Constitucional {artigo: $artigo}) \
     SET a.descricao = $descricao \
     WITH a MATCH (p:Processo_STF {numero: $numero}) \
     MERGE (p)-[:CITA_ARTIGO]->(a)";

const MERGE_PRECEDENT: &str = "MERGE (prec:Processo_STF {numero: $prec_numero}) \
     WITH prec MATCH (p:Processo_STF {numero: $numero}) \
     MERGE (p)-[:CITA_PRECEDENTE]->(prec)";

/// Errors raised while ingesting decisions
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A docket number in the record is malformed
    #[error("invalid docket number: {0}")]
    InvalidDocket(#[from] EntityKeyError),

    /// The store rejected a statement
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// General-repercussion topic referenced by a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRef {
    /// Topic number
    pub number: u32,
    /// Topic description
    pub description: String,
}

/// Constitutional article cited by a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    /// Article reference, e.g. `art. 5º, XXXV`
    pub article: String,
    /// Short description
    #[serde(default)]
    pub description: String,
}

/// A court decision as produced by the document extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Docket number, e.g. `HC 161.450`
    pub docket: String,
    /// Procedural class (`HC`, `RE`, `ADI`, ...)
    pub class: String,
    /// Rapporteur justice
    #[serde(default)]
    pub rapporteur: String,
    /// Judgment date (`YYYY-MM-DD`)
    #[serde(default)]
    pub judged_on: String,
    /// Topics the decision deals with
    #[serde(default)]
    pub topics: Vec<TopicRef>,
    /// Articles cited
    #[serde(default)]
    pub articles: Vec<ArticleRef>,
    /// Docket numbers of cited precedents
    #[serde(default)]
    pub precedents: Vec<String>,
    /// Vote text
    #[serde(default)]
    pub vote_text: String,
    /// Operative part
    #[serde(default)]
    pub operative_text: String,
}

impl Decision {
    /// Create a decision with only its docket and class
    pub fn new(docket: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            docket: docket.into(),
            class: class.into(),
            rapporteur: String::new(),
            judged_on: String::new(),
            topics: Vec::new(),
            articles: Vec::new(),
            precedents: Vec::new(),
            vote_text: String::new(),
            operative_text: String::new(),
        }
    }

    /// Set the rapporteur
    pub fn with_rapporteur(mut self, name: impl Into<String>) -> Self {
        self.rapporteur = name.into();
        self
    }

    /// Add a topic
    pub fn with_topic(mut self, number: u32, description: impl Into<String>) -> Self {
        self.topics.push(TopicRef {
            number,
            description: description.into(),
        });
        self
    }

    /// Add a cited article
    pub fn with_article(mut self, article: impl Into<String>) -> Self {
        self.articles.push(ArticleRef {
            article: article.into(),
            description: String::new(),
        });
        self
    }

    /// Add a cited precedent
    pub fn with_precedent(mut self, docket: impl Into<String>) -> Self {
        self.precedents.push(docket.into());
        self
    }

    /// The normalized docket key
    pub fn key(&self) -> Result<EntityKey, EntityKeyError> {
        EntityKey::parse(&self.docket)
    }
}

fn bind(pairs: &[(&str, &str)]) -> Bindings {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Create constraints and indexes (idempotent)
pub async fn ensure_schema(store: &dyn GraphStore) -> Result<(), SchemaError> {
    for statement in CONSTRAINTS_AND_INDEXES {
        store.run_write(statement, &Bindings::new()).await?;
    }
    debug!(count = CONSTRAINTS_AND_INDEXES.len(), "schema ensured");
    Ok(())
}

/// MERGE a decision with its rapporteur, topics, articles and precedents
///
/// Docket numbers are normalized before writing so reads bound to an
/// `EntityKey` find them.
pub async fn ingest_decision(store: &dyn GraphStore, decision: &Decision) -> Result<(), SchemaError> {
    let key = decision.key()?;
    let numero = key.as_str();

    store
        .run_write(
            MERGE_DECISION,
            &bind(&[
                ("numero", numero),
                ("classe", decision.class.as_str()),
                ("voto", decision.vote_text.as_str()),
                ("dispositivo", decision.operative_text.as_str()),
                ("data", decision.judged_on.as_str()),
            ]),
        )
        .await?;

    if !decision.rapporteur.trim().is_empty() {
        store
            .run_write(
                MERGE_RAPPORTEUR,
                &bind(&[("nome", decision.rapporteur.trim()), ("numero", numero)]),
            )
            .await?;
    }

    for topic in &decision.topics {
        let topic_number = topic.number.to_string();
        store
            .run_write(
                MERGE_TOPIC,
                &bind(&[
                    ("tema_numero", topic_number.as_str()),
                    ("descricao", topic.description.as_str()),
                    ("numero", numero),
                ]),
            )
            .await?;
    }

    for article in &decision.articles {
        store
            .run_write(
                MERGE_ARTICLE,
                &bind(&[
                    ("artigo", article.article.as_str()),
                    ("descricao", article.description.as_str()),
                    ("numero", numero),
                ]),
            )
            .await?;
    }

    for precedent in &decision.precedents {
        let precedent = EntityKey::parse(precedent)?;
        store
            .run_write(
                MERGE_PRECEDENT,
                &bind(&[("prec_numero", precedent.as_str()), ("numero", numero)]),
            )
            .await?;
    }

    info!(docket = %key, topics = decision.topics.len(), "decision ingested");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_json_defaults() {
        let json = r#"{"docket": "hc 161.450", "class": "HC"}"#;
        let decision: Decision = serde_json::from_str(json).unwrap();
        assert!(decision.topics.is_empty());
        assert_eq!(decision.key().unwrap().as_str(), "HC 161.450");
    }

    #[test]
    fn test_builder() {
        let d = Decision::new("RE 1.513.210", "RE")
            .with_rapporteur("Cármen Lúcia")
            .with_topic(506, "Porte de drogas para consumo próprio")
            .with_article("art. 5º")
            .with_precedent("HC 161.450");
        assert_eq!(d.topics[0].number, 506);
        assert_eq!(d.articles[0].article, "art. 5º");
        assert_eq!(d.precedents, vec!["HC 161.450"]);
    }
}
