//! End-to-end verification scenarios over the in-memory graph

use async_trait::async_trait;
use jurisgraph_domain::traits::{Bindings, GraphError, GraphRow, GraphStore, QueryTemplate};
use jurisgraph_domain::{CheckerVerdict, Problem, Verdict};
use jurisgraph_graph::{Decision, MemoryGraph};
use jurisgraph_llm::MockProvider;
use jurisgraph_quality::{JsonlQualityLog, MemoryQualityLog, QualityLog};
use jurisgraph_verifier::{
    CancelHandle, Condition, PartialPolicy, ProbeStatus, Verifier, VerifierConfig, VerifyError, VerifyRequest,
};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn sample_graph() -> MemoryGraph {
    MemoryGraph::with_decisions([
        Decision::new("HC 161.450", "HC")
            .with_rapporteur("Gilmar Mendes")
            .with_topic(506, "Porte de drogas para consumo próprio")
            .with_article("art. 5º, LVII")
            .with_precedent("RE 635.659"),
        Decision::new("RE 635.659", "RE")
            .with_rapporteur("Gilmar Mendes")
            .with_topic(506, "Porte de drogas para consumo próprio"),
        Decision::new("ADPF 442", "ADPF")
            .with_rapporteur("Rosa Weber")
            .with_topic(1000, "Interrupção voluntária da gestação"),
    ])
}

fn fast_config() -> VerifierConfig {
    let mut config = VerifierConfig::default();
    config.checker.check_timeout_ms = 100;
    config
}

fn verifier(graph: MemoryGraph, log: Arc<dyn QualityLog>) -> Verifier {
    Verifier::new(Arc::new(graph), log, fast_config()).unwrap()
}

const EIGHT_CLAIM_REVIEW: &str = "\
Review of the answer follows.

```
CLAIMS: 8
[1] SUPPORTED | ATTRIBUTION | HC 161.450 | Gilmar Mendes | HC 161.450 was reported by Gilmar Mendes
[2] SUPPORTED | TOPIC | HC 161.450 | porte de drogas para consumo próprio | deals with possession for personal use
[3] SUPPORTED | CITATION | HC 161.450 | art. 5º | cites article 5
[4] SUPPORTED | RELATION | HC 161.450; RE 635.659 | - | HC 161.450 relies on RE 635.659
[5] SUPPORTED | ATTRIBUTION | RE 635.659 | Min. Gilmar Mendes | RE 635.659 was reported by Gilmar Mendes
[6] SUPPORTED | TOPIC | ADPF 442 | interrupção voluntária da gestação | ADPF 442 deals with abortion
[7] SUPPORTED | ATTRIBUTION | ADPF 442 | Rosa Weber | ADPF 442 was reported by Rosa Weber
[8] UNKNOWN | OTHER | - | - | the court's majority was comfortable
```
";

#[tokio::test]
async fn test_checker_agrees_and_abstains() {
    let log = Arc::new(MemoryQualityLog::new());
    let verifier = verifier(sample_graph(), log.clone());

    let outcome = verifier
        .verify("Quem relatou o HC 161.450?", "O HC 161.450 foi relatado por Gilmar Mendes.", EIGHT_CLAIM_REVIEW)
        .await;
    let result = &outcome.result;

    assert_eq!(result.total, 8);
    assert_eq!(result.supported, 7);
    assert_eq!(result.fidelity_score, 87.5);
    assert_eq!(result.disagreements(), 0);
    assert_eq!(result.unconfirmed(), 0);
    assert_eq!(result.checked(), 7);
    assert!(outcome.conditions.is_empty());
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.probe, ProbeStatus::NotApplicable);
    assert_eq!(result.verified_entities, vec!["ADPF 442", "HC 161.450", "RE 635.659"]);
    assert_eq!(log.len(), 1);
}

#[tokio::test]
async fn test_denial_contradicted_by_graph() {
    let graph = MemoryGraph::with_decisions([
        Decision::new("HC 200.001", "HC").with_topic(1, "Importação de cannabis para uso medicinal"),
        Decision::new("HC 200.002", "HC").with_topic(2, "Cultivo doméstico de maconha"),
        Decision::new("RE 300.003", "RE").with_topic(3, "Fornecimento de produtos medicinais pelo Estado"),
        Decision::new("MS 400.004", "MS").with_topic(4, "Uso terapêutico de canábis"),
        Decision::new("ADPF 442", "ADPF").with_topic(1000, "Interrupção voluntária da gestação"),
    ]);
    let verifier = verifier(graph, Arc::new(MemoryQualityLog::new()));

    let outcome = verifier
        .verify(
            "Quais decisões tratam de cannabis medicinal?",
            "Não há registro de decisões sobre cannabis medicinal no acervo.",
            "CLAIMS: 0",
        )
        .await;
    let result = &outcome.result;

    assert!(result.no_claims);
    assert_eq!(outcome.probe, ProbeStatus::Contradicted(4));
    assert_eq!(result.total, 5);
    assert_eq!(result.supported, 0);
    assert!(result.fidelity_score <= 50.0);
    assert_eq!(result.disagreements(), 4);
    assert!(result.problems.contains(&Problem::NoClaims));
    assert_eq!(outcome.conditions, vec![Condition::NoClaims]);
    assert_eq!(outcome.exit_code(), 2);
    assert!(!result.verified_entities.contains(&"ADPF 442".to_string()));
}

#[tokio::test]
async fn test_abstention_is_not_unconfirmed() {
    let verifier = verifier(sample_graph(), Arc::new(MemoryQualityLog::new()));
    let mut review = String::from("CLAIMS: 7\n");
    for i in 1..=7 {
        review.push_str(&format!("[{}] SUPPORTED | OTHER | - | - | general statement {}\n", i, i));
    }

    let outcome = verifier.verify("q", "a general answer", &review).await;
    let result = &outcome.result;

    assert_eq!(result.fidelity_score, 100.0);
    assert!(result.is_validated());
    assert!(result.problems.is_empty());
    assert_eq!(result.unconfirmed(), 0);
    assert!(result.claims.iter().all(|c| c.checker_verdict.is_none()));
    assert_eq!(outcome.exit_code(), 0);
}

#[tokio::test]
async fn test_timeouts_fall_back_to_reviewer() {
    let dockets: Vec<String> = (1..=8).map(|i| format!("HC 500.00{}", i)).collect();
    let graph = MemoryGraph::with_decisions(
        dockets
            .iter()
            .map(|d| Decision::new(d.as_str(), "HC").with_rapporteur("Cármen Lúcia")),
    )
    .with_stall(Duration::from_secs(30));
    for docket in &dockets[..3] {
        graph.stall_entity(docket);
    }
    let verifier = verifier(graph, Arc::new(MemoryQualityLog::new()));

    let mut review = String::from("CLAIMS: 8\n");
    for (i, docket) in dockets.iter().enumerate() {
        review.push_str(&format!(
            "[{}] SUPPORTED | ATTRIBUTION | {} | Cármen Lúcia | reported by Cármen Lúcia\n",
            i + 1,
            docket
        ));
    }

    let outcome = verifier.verify("q", "answer", &review).await;
    let result = &outcome.result;

    assert_eq!(result.total, 8);
    assert_eq!(result.unconfirmed(), 3);
    assert_eq!(result.problems.iter().filter(|p| p.is_unconfirmed()).count(), 3);
    assert!(result
        .claims
        .iter()
        .filter(|c| c.checker_verdict == Some(CheckerVerdict::Unavailable))
        .all(|c| c.final_verdict == Some(Verdict::Supported)));
    assert_eq!(result.fidelity_score, 100.0);
    assert_eq!(
        outcome.conditions,
        vec![Condition::GraphUnavailable {
            unavailable: 3,
            attempted: 8
        }]
    );
    assert_eq!(outcome.exit_code(), 3);
}

#[tokio::test]
async fn test_disagreement_and_missing_entity() {
    let verifier = verifier(sample_graph(), Arc::new(MemoryQualityLog::new()));
    let review = "CLAIMS: 2\n\
        [1] SUPPORTED | ATTRIBUTION | HC 161.450 | Rosa Weber | reported by Rosa Weber\n\
        [2] SUPPORTED | TOPIC | HC 999.999 | porte de drogas | deals with drugs\n";

    let outcome = verifier.verify("q", "answer", review).await;
    let result = &outcome.result;

    assert_eq!(result.supported, 0);
    assert_eq!(result.unsupported, 2);
    assert_eq!(result.disagreements(), 2);
    assert_eq!(result.problems.len(), 2);
    assert_eq!(result.missing_entities, vec!["HC 999.999"]);
    assert!(result.problems[1].to_string().contains("not found"));
}

#[tokio::test]
async fn test_malformed_review() {
    let verifier = verifier(sample_graph(), Arc::new(MemoryQualityLog::new()));

    let outcome = verifier
        .verify("q", "O HC 161.450 trata de drogas.", "I think the answer is fine overall.")
        .await;

    assert!(outcome.result.malformed_review);
    assert_eq!(outcome.result.total, 1);
    assert_eq!(outcome.result.fidelity_score, 0.0);
    assert!(matches!(outcome.conditions[..], [Condition::MalformedReview { .. }]));
    assert_eq!(outcome.exit_code(), 5);
}

#[tokio::test]
async fn test_graph_down_is_reported_not_penalized() {
    let graph = sample_graph();
    graph.set_available(false);
    let verifier = verifier(graph, Arc::new(MemoryQualityLog::new()));

    let outcome = verifier
        .verify("q", "answer", "CLAIMS: 1\n[1] SUPPORTED | ATTRIBUTION | HC 161.450 | Gilmar Mendes | x\n")
        .await;

    assert_eq!(outcome.result.fidelity_score, 100.0);
    assert_eq!(outcome.result.unconfirmed(), 1);
    assert_eq!(outcome.exit_code(), 3);
}

#[tokio::test]
async fn test_log_write_failure_still_returns_result() {
    let log = Arc::new(MemoryQualityLog::new());
    log.set_available(false);
    let verifier = verifier(sample_graph(), log.clone());

    let outcome = verifier
        .verify("q", "answer", "CLAIMS: 1\n[1] SUPPORTED | OTHER | - | - | x\n")
        .await;

    assert_eq!(outcome.result.fidelity_score, 100.0);
    assert!(outcome.log_entry.is_none());
    assert!(matches!(outcome.conditions[..], [Condition::LogWriteFailed { .. }]));
    assert_eq!(outcome.exit_code(), 4);
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_logged_result_is_in_next_report() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(JsonlQualityLog::new(dir.path().join("logs").join("quality_log.jsonl")));
    let verifier = verifier(sample_graph(), log);

    assert_eq!(verifier.aggregate_report().unwrap().queries, 0);

    verifier.verify("q1", "a", EIGHT_CLAIM_REVIEW).await;
    let report = verifier.aggregate_report().unwrap();
    assert_eq!(report.queries, 1);
    assert_eq!(report.total_claims, 8);
    assert_eq!(report.total_supported, 7);
    assert_eq!(report.mean_score, 87.5);

    verifier.verify("q2", "a", "CLAIMS: 0").await;
    let report = verifier.aggregate_report().unwrap();
    assert_eq!(report.queries, 2);
    assert_eq!(report.no_claims, 1);
    assert_eq!(report.min_score, 0.0);
}

fn stalled_request() -> (Verifier, VerifyRequest) {
    let graph = sample_graph().with_stall(Duration::from_secs(30));
    graph.stall_entity("HC 161.450");
    let mut config = VerifierConfig::default();
    config.checker.check_timeout_ms = 60_000;
    let verifier = Verifier::new(Arc::new(graph), Arc::new(MemoryQualityLog::new()), config).unwrap();

    let review = "CLAIMS: 2\n\
        [1] SUPPORTED | ATTRIBUTION | HC 161.450 | Gilmar Mendes | x\n\
        [2] SUPPORTED | ATTRIBUTION | ADPF 442 | Rosa Weber | y\n";
    (verifier, VerifyRequest::new("q", "answer", review))
}

#[tokio::test]
async fn test_cancel_discards_verification() {
    let (verifier, request) = stalled_request();
    let (handle, signal) = CancelHandle::new();

    let (result, _) = tokio::join!(
        verifier.verify_with_cancel(request, signal, PartialPolicy::Discard),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.cancel();
        }
    );

    assert!(matches!(result, Err(VerifyError::Cancelled)));
    assert_eq!(verifier.aggregate_report().unwrap().queries, 0);
}

#[tokio::test]
async fn test_cancel_keeps_partial_results() {
    let (verifier, request) = stalled_request();
    let (handle, signal) = CancelHandle::new();

    let (result, _) = tokio::join!(
        verifier.verify_with_cancel(request, signal, PartialPolicy::KeepResolved),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            handle.cancel();
        }
    );
    let outcome = result.unwrap();

    assert_eq!(outcome.result.claims[0].checker_verdict, Some(CheckerVerdict::Unavailable));
    assert_eq!(outcome.result.claims[1].checker_verdict, Some(CheckerVerdict::Supported));
    assert_eq!(outcome.result.unconfirmed(), 1);
    assert_eq!(outcome.exit_code(), 3);
    assert_eq!(verifier.aggregate_report().unwrap().queries, 1);
}

#[tokio::test]
async fn test_ask_pipeline() {
    let verifier = verifier(sample_graph(), Arc::new(MemoryQualityLog::new()));
    let review = "CLAIMS: 1\n[1] SUPPORTED | ATTRIBUTION | HC 161.450 | Gilmar Mendes | x\n\
        ```quality_metrics\n{\"validated\": true, \"fidelity_score\": 60.0}\n```";
    let provider = MockProvider::default()
        .respond_when("strict legal reviewer", review)
        .respond_when("legal analyst", "O HC 161.450 foi relatado por Gilmar Mendes.");

    let asked = verifier.ask(&provider, "Quem relatou o HC 161.450?").await.unwrap();

    assert_eq!(provider.call_count(), 2);
    assert_eq!(asked.answer, "O HC 161.450 foi relatado por Gilmar Mendes.");
    assert_eq!(asked.verification.result.fidelity_score, 100.0);
    assert_eq!(asked.verification.result.reviewer_score, Some(60.0));
    assert_eq!(asked.verification.agreement.difference, 40.0);
}

#[tokio::test]
async fn test_ask_reviewer_failure() {
    let verifier = verifier(sample_graph(), Arc::new(MemoryQualityLog::new()));
    let provider = MockProvider::new("answer").fail_when("strict legal reviewer");

    let result = verifier.ask(&provider, "q").await;
    assert!(matches!(result, Err(VerifyError::Generation(_))));
}

/// Accepts every call and never answers
struct SilentStore;

#[async_trait]
impl GraphStore for SilentStore {
    async fn run_read(&self, _template: &QueryTemplate, _bindings: &Bindings) -> Result<Vec<GraphRow>, GraphError> {
        std::future::pending().await
    }

    async fn run_write(&self, _statement: &str, _bindings: &Bindings) -> Result<(), GraphError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_ask_does_not_wait_on_a_silent_store() {
    let verifier = Verifier::new(Arc::new(SilentStore), Arc::new(MemoryQualityLog::new()), fast_config()).unwrap();
    let provider = MockProvider::new("CLAIMS: 0");

    let asked = tokio::time::timeout(Duration::from_secs(3), verifier.ask(&provider, "q"))
        .await
        .expect("ask finished without waiting on the store")
        .unwrap();

    assert_eq!(provider.call_count(), 2);
    assert!(asked.verification.result.no_claims);
}
