// crates/verdict-chain/src/trace.rs
// ============================================================================
// Module: Chain Tracing
// Description: Observation hooks for chain evaluation.
// Purpose: Let callers capture per-check results without changing evaluation.
// Dependencies: crate::conclusion
// ============================================================================

//! ## Overview
//! [`ChainTrace`] receives every executed check result in order, then the
//! final conclusion. [`NoopTrace`] discards everything and is what
//! [`crate::Chain::evaluate`] uses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::conclusion::ChainConclusion;
use crate::conclusion::CheckResult;

// ============================================================================
// SECTION: Trace Hooks
// ============================================================================

/// Observer notified during chain evaluation.
pub trait ChainTrace {
    /// Called after each executed check.
    fn on_check_evaluated(&mut self, _result: &CheckResult) {}

    /// Called once the chain has finished.
    fn on_chain_completed(&mut self, _conclusion: &ChainConclusion) {}
}

/// Trace that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl ChainTrace for NoopTrace {}
