//! File-backed quality log behaviour

use chrono::Utc;
use jurisgraph_quality::{AggregateReport, JsonlQualityLog, QualityError, QualityLog, QualityLogEntry};
use std::fs;
use std::io::Write;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn entry(query: &str, score: f64, total: usize, supported: usize) -> QualityLogEntry {
    QualityLogEntry {
        timestamp: Utc::now(),
        query: query.to_string(),
        fidelity_score: score,
        total_claims: total,
        supported,
        unsupported: total - supported,
        unknown: 0,
        validated: supported == total,
        no_claims: false,
        malformed_review: false,
        unconfirmed: 0,
        disagreements: 0,
        problems: vec!["uma observação com acentuação".to_string()],
        verified_entities: vec!["HC 161.450".to_string()],
        missing_entities: Vec::new(),
        reviewer_score: None,
        analyst_chars: 10,
        reviewer_chars: 20,
    }
}

#[test]
fn test_missing_file_is_empty_log() {
    let dir = TempDir::new().unwrap();
    let log = JsonlQualityLog::new(dir.path().join("absent.jsonl"));
    assert!(log.entries().unwrap().is_empty());
}

#[test]
fn test_append_creates_directories_and_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs").join("quality_log.jsonl");
    let log = JsonlQualityLog::new(&path);

    log.append(&entry("primeira", 87.5, 8, 7)).unwrap();
    log.append(&entry("segunda", 100.0, 7, 7)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.ends_with('\n'));

    let entries = log.entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].query, "primeira");
    assert_eq!(entries[1].fidelity_score, 100.0);
}

#[test]
fn test_append_is_visible_to_next_report() {
    let dir = TempDir::new().unwrap();
    let log = JsonlQualityLog::new(dir.path().join("q.jsonl"));

    log.append(&entry("q", 50.0, 4, 2)).unwrap();
    let report = AggregateReport::from_entries(&log.entries().unwrap());
    assert_eq!(report.queries, 1);
    assert_eq!(report.total_claims, 4);
    assert_eq!(report.total_supported, 2);
}

#[test]
fn test_corrupt_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("q.jsonl");
    let log = JsonlQualityLog::new(&path);
    log.append(&entry("ok", 50.0, 2, 1)).unwrap();

    let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(file, "{{\"timestamp\": \"truncated").unwrap();
    drop(file);
    log.append(&entry("ok again", 100.0, 1, 1)).unwrap();

    let entries = log.entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].query, "ok again");
}

#[test]
fn test_unwritable_location_fails() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "a file, not a directory").unwrap();

    let log = JsonlQualityLog::new(blocker.join("q.jsonl"));
    assert!(matches!(log.append(&entry("q", 0.0, 1, 0)), Err(QualityError::Io(_))));
}

#[test]
fn test_concurrent_appends_do_not_interleave() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(JsonlQualityLog::new(dir.path().join("q.jsonl")));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for i in 0..25 {
                    let query = format!("thread {} query {} {}", t, i, "x".repeat(200));
                    log.append(&entry(&query, 75.0, 4, 3)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let content = fs::read_to_string(log.path()).unwrap();
    assert_eq!(content.lines().count(), 200);
    assert_eq!(log.entries().unwrap().len(), 200);
}
