//! Ingestion statements issued against the in-memory store

use jurisgraph_graph::schema::CONSTRAINTS_AND_INDEXES;
use jurisgraph_graph::{ensure_schema, ingest_decision, Decision, MemoryGraph, SchemaError};
use std::io::Write;

#[tokio::test]
async fn ingests_every_relation() {
    let graph = MemoryGraph::new();
    let decision = Decision::new("HC 161.450", "HC")
        .with_rapporteur("Gilmar Mendes")
        .with_topic(506, "Porte de drogas")
        .with_topic(1, "Prisão preventiva")
        .with_article("art. 5º")
        .with_precedent("RE 635.659");

    ingest_decision(&graph, &decision).await.unwrap();

    let writes = graph.writes();
    assert_eq!(writes.len(), 6);
    assert!(writes[0].contains("MERGE (p:Processo_STF"));
    assert!(writes[1].contains("RELATADO_POR"));
    assert_eq!(writes.iter().filter(|w| w.contains("TRATA_DE")).count(), 2);
    assert!(writes[4].contains("CITA_ARTIGO"));
    assert!(writes[5].contains("CITA_PRECEDENTE"));
}

#[tokio::test]
async fn rejects_malformed_docket() {
    let graph = MemoryGraph::new();
    let err = ingest_decision(&graph, &Decision::new("processo 12", "HC"))
        .await
        .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidDocket(_)));
    assert!(graph.writes().is_empty());
}

#[tokio::test]
async fn schema_fails_when_store_is_down() {
    let graph = MemoryGraph::new();
    ensure_schema(&graph).await.unwrap();
    assert_eq!(graph.writes().len(), CONSTRAINTS_AND_INDEXES.len());

    graph.set_available(false);
    let err = ensure_schema(&graph).await.unwrap_err();
    assert!(matches!(err, SchemaError::Graph(_)));
}

#[tokio::test]
async fn decision_file_roundtrip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"docket": "RE 1.513.210", "class": "RE", "rapporteur": "Cármen Lúcia",
            "topics": [{{"number": 1234, "description": "Tema"}}]}}"#
    )
    .unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    let decision: Decision = serde_json::from_str(&text).unwrap();
    assert_eq!(decision.topics[0].number, 1234);
    assert!(decision.articles.is_empty());
}
