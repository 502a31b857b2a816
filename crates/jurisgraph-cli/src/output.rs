//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use jurisgraph_domain::{Claim, Verdict};
use jurisgraph_quality::{render_summary, AggregateReport};
use jurisgraph_verifier::{ProbeStatus, VerificationOutcome};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Graph and log state shown by `status`.
#[derive(Debug, Clone)]
pub struct StatusInfo {
    /// Bolt URI
    pub graph_uri: String,
    /// `Ok` when the graph answered a ping, the failure otherwise
    pub graph: std::result::Result<(), String>,
    /// Quality log location
    pub log_path: String,
    /// Verifications recorded so far, if the log could be read
    pub logged: Option<usize>,
    /// Model used by `ask`
    pub model: String,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a verification outcome.
    pub fn format_outcome(&self, outcome: &VerificationOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_outcome_json(outcome),
            OutputFormat::Table => Ok(self.format_outcome_table(outcome)),
            OutputFormat::Quiet => Ok(format!("{:.1}", outcome.result.fidelity_score)),
        }
    }

    fn format_outcome_json(&self, outcome: &VerificationOutcome) -> Result<String> {
        let result = &outcome.result;
        let claims: Vec<serde_json::Value> = result
            .claims
            .iter()
            .map(|c| {
                serde_json::json!({
                    "index": c.index,
                    "kind": c.kind.as_str(),
                    "origin": format!("{:?}", c.origin),
                    "text": c.text,
                    "entities": c.entities,
                    "value": c.value,
                    "reviewer": c.reviewer_verdict.as_str(),
                    "checker": c.checker_verdict.map(|v| v.as_str()),
                    "checker_note": c.checker_note,
                    "final": c.final_verdict.map(|v| v.as_str()),
                })
            })
            .collect();

        let value = serde_json::json!({
            "query": result.query,
            "fidelity_score": result.fidelity_score,
            "total": result.total,
            "supported": result.supported,
            "unsupported": result.unsupported,
            "unknown": result.unknown(),
            "unconfirmed": result.unconfirmed(),
            "validated": result.is_validated(),
            "no_claims": result.no_claims,
            "malformed_review": result.malformed_review,
            "verified_entities": result.verified_entities,
            "missing_entities": result.missing_entities,
            "problems": result.problems.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
            "claims": claims,
            "agreement": outcome.agreement,
            "negation_probe": probe_label(&outcome.probe),
            "conditions": outcome.conditions,
            "logged": outcome.log_entry.is_some(),
            "exit_code": outcome.exit_code(),
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_outcome_table(&self, outcome: &VerificationOutcome) -> String {
        let mut sections = Vec::new();
        if !outcome.result.claims.is_empty() {
            sections.push(self.claims_table(&outcome.result.claims));
        }
        sections.push(render_summary(&outcome.result));

        if outcome.probe != ProbeStatus::NotApplicable {
            sections.push(self.info(&format!("Negation probe: {}", probe_label(&outcome.probe))));
        }
        for condition in &outcome.conditions {
            sections.push(self.warning(&condition.to_string()));
        }
        if outcome.conditions.is_empty() {
            sections.push(self.success("Verification clean"));
        }
        sections.join("\n")
    }

    fn claims_table(&self, claims: &[Claim]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["#", "Kind", "Entities", "Reviewer", "Checker", "Final", "Claim"]);

        for claim in claims {
            let checker = claim.checker_verdict.map(|v| v.as_str()).unwrap_or("-");
            let final_verdict = match claim.final_verdict {
                Some(Verdict::Supported) => self.colorize("SUPPORTED", "green"),
                Some(Verdict::Unsupported) => self.colorize("UNSUPPORTED", "red"),
                Some(Verdict::Unknown) => self.colorize("UNKNOWN", "yellow"),
                None => "-".to_string(),
            };
            builder.push_record([
                claim.index.to_string(),
                claim.kind.as_str().to_string(),
                claim.entities.join("; "),
                claim.reviewer_verdict.as_str().to_string(),
                checker.to_string(),
                final_verdict,
                truncate(&claim.text, 60),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the aggregate report.
    pub fn format_report(&self, report: &AggregateReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(format!("{:.1}", report.mean_score)),
            OutputFormat::Table => {
                if report.queries == 0 {
                    return Ok(self.colorize("No verifications logged yet.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Metric", "Value"]);
                for (metric, value) in [
                    ("Queries", report.queries.to_string()),
                    ("Mean score", format!("{:.1}%", report.mean_score)),
                    ("Min score", format!("{:.1}%", report.min_score)),
                    ("Max score", format!("{:.1}%", report.max_score)),
                    ("Claims", report.total_claims.to_string()),
                    ("Supported", report.total_supported.to_string()),
                    ("Unsupported", report.total_unsupported.to_string()),
                    ("Validated", report.validated.to_string()),
                    ("No claims", report.no_claims.to_string()),
                    ("Partially checked", report.partially_checked.to_string()),
                    ("Disagreements", report.disagreements.to_string()),
                ] {
                    builder.push_record([metric.to_string(), value]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format graph and log status.
    pub fn format_status(&self, status: &StatusInfo) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "graph_uri": status.graph_uri,
                    "graph_reachable": status.graph.is_ok(),
                    "graph_error": status.graph.as_ref().err(),
                    "log_path": status.log_path,
                    "logged": status.logged,
                    "model": status.model,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(if status.graph.is_ok() { "up" } else { "down" }.to_string()),
            OutputFormat::Table => {
                let graph = match &status.graph {
                    Ok(()) => self.success(&format!("Graph reachable at {}", status.graph_uri)),
                    Err(e) => self.error(&format!("Graph unavailable at {}: {}", status.graph_uri, e)),
                };
                let logged = status
                    .logged
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "unreadable".to_string());
                Ok([
                    graph,
                    self.info(&format!("Quality log: {} ({} entries)", status.log_path, logged)),
                    self.info(&format!("Model: {}", status.model)),
                ]
                .join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format an ingestion result.
    pub fn ingested(&self, decisions: usize, files: usize) -> String {
        self.success(&format!("Ingested {} decision(s) from {} file(s)", decisions, files))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn probe_label(status: &ProbeStatus) -> String {
    match status {
        ProbeStatus::NotApplicable => "not applicable".to_string(),
        ProbeStatus::ConfirmedAbsence => "absence confirmed".to_string(),
        ProbeStatus::Contradicted(n) => format!("contradicted by {} topic(s)", n),
        ProbeStatus::Unavailable(reason) => format!("unavailable ({})", reason),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jurisgraph_graph::{Decision, MemoryGraph};
    use jurisgraph_quality::MemoryQualityLog;
    use jurisgraph_verifier::{Verifier, VerifierConfig};
    use std::sync::Arc;

    async fn outcome(review: &str) -> VerificationOutcome {
        let graph = MemoryGraph::with_decisions([Decision::new("HC 161.450", "HC").with_rapporteur("Gilmar Mendes")]);
        let verifier = Verifier::new(Arc::new(graph), Arc::new(MemoryQualityLog::new()), VerifierConfig::default()).unwrap();
        verifier.verify("Quem relatou o HC 161.450?", "Gilmar Mendes.", review).await
    }

    const REVIEW: &str = "CLAIMS: 1\n[1] SUPPORTED | ATTRIBUTION | HC 161.450 | Gilmar Mendes | reported by Gilmar Mendes\n";

    #[tokio::test]
    async fn test_json_outcome() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_outcome(&outcome(REVIEW).await).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["fidelity_score"], 100.0);
        assert_eq!(value["claims"][0]["checker"], "SUPPORTED");
        assert_eq!(value["exit_code"], 0);
    }

    #[tokio::test]
    async fn test_table_outcome_lists_conditions() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_outcome(&outcome("CLAIMS: 0").await).unwrap();
        assert!(output.contains("Quality score: 0.0%"));
        assert!(output.contains("⚠"));
        assert!(!output.contains("Verification clean"));
    }

    #[tokio::test]
    async fn test_quiet_outcome() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_outcome(&outcome(REVIEW).await).unwrap(), "100.0");
    }

    #[test]
    fn test_empty_report() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&AggregateReport::from_entries(&[])).unwrap();
        assert!(output.contains("No verifications logged"));
    }

    #[test]
    fn test_status_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let status = StatusInfo {
            graph_uri: "bolt://localhost:7687".to_string(),
            graph: Err("connection refused".to_string()),
            log_path: "logs/quality_log.jsonl".to_string(),
            logged: Some(3),
            model: "llama3.1".to_string(),
        };
        assert_eq!(formatter.format_status(&status).unwrap(), "down");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
