// crates/sigverdict-core/src/lib.rs
// ============================================================================
// Module: SigVerdict Core Library
// Description: Public API surface for the signature validation engine.
// Purpose: Expose the fact model, policy, report types, and engine.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! SigVerdict validates advanced electronic signatures in the manner of ETSI
//! EN 319 102-1. It reads a diagnostic fact model extracted from signed
//! documents (signatures, certificates, revocation data, timestamps) and a
//! validation policy, and produces a deterministic [`ValidationReport`] with
//! an indication, sub-indication, and full audit trail per signature.
//!
//! Parsing signed documents and fetching revocation data are out of scope;
//! the engine only judges facts it is given.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;
pub use interfaces::AuditEventKind;
pub use interfaces::AuditStage;
pub use interfaces::MemoryAuditSink;
pub use interfaces::NoopAuditSink;
pub use interfaces::ValidationAuditEvent;
pub use interfaces::ValidationAuditSink;
pub use runtime::ValidationEngine;
pub use runtime::ValidationError;
pub use verdict_chain::Indication;
pub use verdict_chain::Level;
pub use verdict_chain::SubIndication;
pub use verdict_chain::Verdict;
