// crates/sigverdict-cli/tests/audit_sinks.rs
// ============================================================================
// Module: CLI Audit Sink Tests
// Description: JSON-lines output of the file audit sink.
// Purpose: Ensure audit logs are append-only and machine readable.
// Dependencies: sigverdict-cli, sigverdict-core, serde_json, tempfile
// ============================================================================

//! ## Overview
//! The file sink writes one JSON object per event and appends across
//! reopenings of the same path.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use serde_json::Value;
use sigverdict_cli::audit::FileAuditSink;
use sigverdict_core::AuditEventKind;
use sigverdict_core::AuditStage;
use sigverdict_core::SubIndication;
use sigverdict_core::TokenId;
use sigverdict_core::ValidationAuditEvent;
use sigverdict_core::ValidationAuditSink;
use sigverdict_core::Verdict;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a signature-stage event for `token`.
fn event(token: &str, verdict: Verdict) -> ValidationAuditEvent {
    ValidationAuditEvent {
        event: AuditEventKind::TokenValidated,
        stage: AuditStage::Signatures,
        token_id: TokenId::new(token),
        verdict,
        proof_time: None,
        message: None,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies each event lands on its own JSON line.
#[test]
fn file_sink_writes_json_lines() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit.jsonl");
    let sink = FileAuditSink::new(&path).expect("open sink");
    sink.record(&event("S-1", Verdict::passed()));
    sink.record(&event("S-2", Verdict::indeterminate(SubIndication::TryLater)));

    let contents = fs::read_to_string(&path).expect("read log");
    let lines: Vec<Value> =
        contents.lines().map(|line| serde_json::from_str(line).expect("json line")).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "token_validated");
    assert_eq!(lines[0]["stage"], "signatures");
    assert_eq!(lines[0]["token_id"], "S-1");
    assert_eq!(lines[1]["token_id"], "S-2");
    assert!(lines[0].get("proof_time").is_none());
}

/// Verifies reopening the same path appends rather than truncates.
#[test]
fn file_sink_appends_across_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("audit.jsonl");
    FileAuditSink::new(&path).expect("open sink").record(&event("S-1", Verdict::passed()));
    FileAuditSink::new(&path).expect("reopen sink").record(&event("S-2", Verdict::passed()));

    let contents = fs::read_to_string(&path).expect("read log");
    assert_eq!(contents.lines().count(), 2);
}

/// Verifies an unopenable path surfaces an error.
#[test]
fn file_sink_rejects_missing_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("audit.jsonl");
    assert!(FileAuditSink::new(&path).is_err());
}
