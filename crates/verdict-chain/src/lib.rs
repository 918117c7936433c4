// crates/verdict-chain/src/lib.rs
// ============================================================================
// Module: Verdict Chain Root
// Description: Public API surface for the ordered-check chain engine.
// Purpose: Wire together the verdict taxonomy, severity levels, checks, and chains.
// Dependencies: crate::{chain, check, conclusion, error, indication, level, trace}
// ============================================================================

//! ## Overview
//! Verdict Chain evaluates ordered lists of named checks against a severity
//! table and produces an immutable [`ChainConclusion`]. A check failing at
//! [`Level::Fail`] stops the chain and sets its verdict; lower severities are
//! recorded and evaluation continues. The crate is domain-agnostic: callers
//! own check names, messages, and failure codes.
//!
//! The verdict taxonomy ([`Indication`], [`SubIndication`], [`Verdict`]) keeps
//! every refinement code consistent with its owning indication through one
//! fixed mapping table.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod chain;
pub mod check;
pub mod conclusion;
pub mod error;
pub mod indication;
pub mod level;
pub mod trace;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use chain::Chain;
pub use check::Check;
pub use conclusion::ChainConclusion;
pub use conclusion::ChainMessage;
pub use conclusion::CheckResult;
pub use conclusion::CheckStatus;
pub use error::VerdictError;
pub use indication::Indication;
pub use indication::SubIndication;
pub use indication::Verdict;
pub use level::Level;
pub use trace::ChainTrace;
pub use trace::NoopTrace;
