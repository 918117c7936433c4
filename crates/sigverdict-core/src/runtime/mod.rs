// crates/sigverdict-core/src/runtime/mod.rs
// ============================================================================
// Module: SigVerdict Runtime
// Description: Building blocks, chain building, time sliding, and processes.
// Purpose: Evaluate a fact model against a policy at an injected time.
// Dependencies: crate::{core, interfaces}, verdict-chain
// ============================================================================

//! ## Overview
//! Runtime modules are pure functions over borrowed inputs. There is no
//! clock, no I/O, and no shared mutable state; the current time is always
//! a parameter. [`ValidationEngine`] is the single entry point.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod bbb;
pub mod chains;
pub mod context;
pub mod crypto;
pub mod engine;
pub mod precedence;
pub mod process;
pub mod revocation;
pub mod structure;
pub mod time_sliding;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bbb::BbbSubject;
pub use chains::CertificateChain;
pub use chains::ChainBuildError;
pub use chains::ChainIndex;
pub use context::PolicyContext;
pub use context::ValidationScope;
pub use engine::ValidationEngine;
pub use engine::ValidationError;
pub use precedence::dominant;
pub use precedence::rank;
pub use revocation::RevocationTrust;
