// crates/sigverdict-core/src/interfaces/mod.rs
// ============================================================================
// Module: SigVerdict Interfaces
// Description: Audit sink contract used by the validation engine.
// Purpose: Let callers route per-token outcomes without embedding a logger.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! The engine reports one [`ValidationAuditEvent`] per concluded token, one
//! per applied time-sliding run, and one per malformed token. Sinks must not
//! influence evaluation; they only observe it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use serde::Deserialize;
use serde::Serialize;
use verdict_chain::Verdict;

use crate::core::identifiers::TokenId;
use crate::core::poe::ProofOfExistence;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Audit event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    /// A token reached its final verdict.
    TokenValidated,
    /// Past signature validation ran for a token.
    TimeSlidingApplied,
    /// A token was rejected as structurally unusable.
    MalformedInput,
}

impl AuditEventKind {
    /// Returns the event label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TokenValidated => "token_validated",
            Self::TimeSlidingApplied => "time_sliding_applied",
            Self::MalformedInput => "malformed_input",
        }
    }
}

/// Validation stage an event was emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStage {
    /// Revocation token stage.
    Revocations,
    /// Timestamp stage.
    Timestamps,
    /// Signature stage.
    Signatures,
}

/// Validation audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationAuditEvent {
    /// Event classification.
    pub event: AuditEventKind,
    /// Stage that emitted the event.
    pub stage: AuditStage,
    /// Token concerned.
    pub token_id: TokenId,
    /// Verdict at emission time.
    pub verdict: Verdict,
    /// Proof of existence the verdict holds at, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_time: Option<ProofOfExistence>,
    /// Free-form detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for validation events.
pub trait ValidationAuditSink: Send + Sync {
    /// Records an audit event.
    fn record(&self, event: &ValidationAuditEvent);
}

/// No-op audit sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

impl ValidationAuditSink for NoopAuditSink {
    fn record(&self, _event: &ValidationAuditEvent) {}
}

/// Audit sink that keeps events in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    /// Recorded events in emission order.
    events: Mutex<Vec<ValidationAuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ValidationAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl ValidationAuditSink for MemoryAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
