//! Read templates against the decision graph
//!
//! Every template binds `$entity` to a normalized docket number unless noted.
//! A bound docket matches a stored one exactly or as its prefix before a
//! `/UF` suffix, so `RE 635.659` never matches `ARE 635.659`.
//! Columns are coalesced so rows never carry nulls.

use jurisgraph_domain::traits::{QueryTemplate, TemplateId};

/// Decision and its rapporteur (`RELATADO_POR`)
pub const ATTRIBUTION: QueryTemplate = QueryTemplate {
    id: TemplateId::Attribution,
    cypher: "MATCH (p:Processo_STF)-[:RELATADO_POR]->(m:Ministro_Relator) \
             WHERE (toUpper(p.numero) = $entity OR toUpper(p.numero) STARTS WITH $entity + '/') \
             RETURN p.numero AS entity, coalesce(m.nome, '') AS value",
    columns: &["entity", "value"],
};

/// Decision and the topics it deals with (`TRATA_DE`)
pub const TOPIC: QueryTemplate = QueryTemplate {
    id: TemplateId::Topic,
    cypher: "MATCH (p:Processo_STF)-[:TRATA_DE]->(t:Tema_Repercussao_Geral) \
             WHERE (toUpper(p.numero) = $entity OR toUpper(p.numero) STARTS WITH $entity + '/') \
             RETURN p.numero AS entity, coalesce(t.descricao, '') AS value",
    columns: &["entity", "value"],
};

/// Decision and the constitutional articles it cites (`CITA_ARTIGO`)
pub const CITATION: QueryTemplate = QueryTemplate {
    id: TemplateId::Citation,
    cypher: "MATCH (p:Processo_STF)-[:CITA_ARTIGO]->(a:Artigo_Constitucional) \
             WHERE (toUpper(p.numero) = $entity OR toUpper(p.numero) STARTS WITH $entity + '/') \
             RETURN p.numero AS entity, coalesce(a.artigo, '') AS value",
    columns: &["entity", "value"],
};

/// Shortest connection of one to three hops between `$entity` and `$target`
pub const RELATION: QueryTemplate = QueryTemplate {
    id: TemplateId::Relation,
    cypher: "MATCH path = (a:Processo_STF)-[:CITA_PRECEDENTE|TRATA_DE|CITA_ARTIGO*1..3]-(b:Processo_STF) \
             WHERE (toUpper(a.numero) = $entity OR toUpper(a.numero) STARTS WITH $entity + '/') \
             AND (toUpper(b.numero) = $target OR toUpper(b.numero) STARTS WITH $target + '/') \
             AND a <> b \
             RETURN a.numero AS entity, b.numero AS target, length(path) AS hops \
             ORDER BY hops LIMIT 1",
    columns: &["entity", "target", "hops"],
};

/// Whether a decision node exists
pub const ENTITY_EXISTS: QueryTemplate = QueryTemplate {
    id: TemplateId::EntityExists,
    cypher: "MATCH (p:Processo_STF) WHERE (toUpper(p.numero) = $entity OR toUpper(p.numero) STARTS WITH $entity + '/') \
             RETURN p.numero AS entity LIMIT 1",
    columns: &["entity"],
};

/// Every decision/topic pair (no bindings)
pub const TOPIC_INDEX: QueryTemplate = QueryTemplate {
    id: TemplateId::TopicIndex,
    cypher: "MATCH (p:Processo_STF)-[:TRATA_DE]->(t:Tema_Repercussao_Geral) \
             RETURN p.numero AS entity, coalesce(t.descricao, '') AS value",
    columns: &["entity", "value"],
};

/// Every decision with its relations (no bindings)
pub const DECISION_DIGEST: QueryTemplate = QueryTemplate {
    id: TemplateId::DecisionDigest,
    cypher: "MATCH (p:Processo_STF) \
             OPTIONAL MATCH (p)-[:RELATADO_POR]->(m:Ministro_Relator) \
             OPTIONAL MATCH (p)-[:TRATA_DE]->(t:Tema_Repercussao_Geral) \
             OPTIONAL MATCH (p)-[:CITA_ARTIGO]->(a:Artigo_Constitucional) \
             OPTIONAL MATCH (p)-[:CITA_PRECEDENTE]->(q:Processo_STF) \
             RETURN p.numero AS entity, coalesce(p.classe, '') AS class, \
             coalesce(p.data_julgamento, '') AS judged_on, coalesce(m.nome, '') AS rapporteur, \
             collect(DISTINCT t.descricao) AS topics, collect(DISTINCT a.artigo) AS articles, \
             collect(DISTINCT q.numero) AS precedents \
             ORDER BY entity",
    columns: &["entity", "class", "judged_on", "rapporteur", "topics", "articles", "precedents"],
};

/// Connectivity probe
pub const PING: QueryTemplate = QueryTemplate {
    id: TemplateId::Ping,
    cypher: "RETURN 1 AS ok",
    columns: &["ok"],
};

/// Separator used when a list column is flattened to text
pub const LIST_SEPARATOR: &str = "; ";
