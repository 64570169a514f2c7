//! Integration test: structured logging contract
//!
//! Validates that:
//! 1. LogEmitter writes JSONL that passes `validate_log_file`.
//! 2. Trace IDs are sequenced per emitter.
//! 3. The validator catches schema violations.
//! 4. ArtifactIndex hashes files and serializes.
//!
//! Run: cargo test -p ipcanon-harness --test structured_log_test

use std::path::PathBuf;

use ipcanon_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, StreamKind, sha256_hex,
    validate_log_file, validate_log_line,
};
use serde_json::json;

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ipcanon-{}-{name}", std::process::id()))
}

#[test]
fn emitter_output_validates() {
    let path = scratch_path("emitter.jsonl");
    {
        let mut em = LogEmitter::to_file(&path, "run-7", "bundled").unwrap();
        em.emit(LogLevel::Info, "run_start").unwrap();
        em.emit_entry(
            LogEntry::new("", LogLevel::Info, "case_result")
                .with_stream(StreamKind::Conformance)
                .with_mode("strict")
                .with_api("inet/normalize", "normalize")
                .with_outcome(Outcome::Pass)
                .with_latency_ns(1_250)
                .with_details(json!({"case": "normalize_lowercase"})),
        )
        .unwrap();
        em.emit_entry(
            LogEntry::new("", LogLevel::Info, "run_end")
                .with_duration_ms(3)
                .with_artifacts(vec!["report.json".to_string()]),
        )
        .unwrap();
        em.flush().unwrap();
    }

    let (lines, errors) = validate_log_file(&path).unwrap();
    assert_eq!(lines, 3);
    assert!(errors.is_empty(), "{errors:?}");

    let content = std::fs::read_to_string(&path).unwrap();
    let traces: Vec<String> = content
        .lines()
        .map(|l| validate_log_line(l, 0).unwrap().trace_id)
        .collect();
    assert_eq!(
        traces,
        [
            "run-7::bundled::001",
            "run-7::bundled::002",
            "run-7::bundled::003"
        ]
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn validator_reports_violations() {
    let missing = r#"{"timestamp":"2026-10-19T00:00:00Z","level":"info","event":"x"}"#;
    let errs = validate_log_line(missing, 1).unwrap_err();
    assert!(errs.iter().any(|e| e.field == "trace_id"));

    let bad_mode = r#"{"timestamp":"t","trace_id":"a::b::001","level":"info","event":"x","mode":"lenient"}"#;
    let errs = validate_log_line(bad_mode, 2).unwrap_err();
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].field, "mode");
    assert!(errs[0].to_string().starts_with("line 2:"));

    let bad_trace = r#"{"timestamp":"t","trace_id":"flat","level":"info","event":"x"}"#;
    assert!(validate_log_line(bad_trace, 3).is_err());

    assert!(validate_log_line("not json", 4).is_err());
    assert!(validate_log_line("[1,2]", 5).is_err());
}

#[test]
fn artifact_index_hashes_files() {
    let path = scratch_path("artifact.txt");
    std::fs::write(&path, b"abc").unwrap();

    let mut index = ArtifactIndex::new("run-7");
    index.add_file(&path, "fixture").unwrap();
    index.add("report.json", "report", sha256_hex(b""));

    assert_eq!(index.artifacts.len(), 2);
    assert_eq!(
        index.artifacts[0].sha256,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(index.artifacts[0].size_bytes, Some(3));
    assert_eq!(
        index.artifacts[1].sha256,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );

    let json: serde_json::Value = serde_json::from_str(&index.to_json().unwrap()).unwrap();
    assert_eq!(json["index_version"], 1);
    assert_eq!(json["run_id"], "run-7");
    assert!(json["artifacts"][1].get("size_bytes").is_none());

    let _ = std::fs::remove_file(&path);
}
