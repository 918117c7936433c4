// crates/sigverdict-config/src/lib.rs
// ============================================================================
// Module: SigVerdict Config Library
// Description: Policy file model, validation, and canonical example.
// Purpose: Single source of truth for sigverdict-policy.toml semantics.
// Dependencies: sigverdict-core, serde, time, toml
// ============================================================================

//! ## Overview
//! `sigverdict-config` turns a policy TOML file into a
//! [`sigverdict_core::ValidationPolicy`]. Validation is strict and
//! fail-closed; the canonical example reproduces the built-in defaults.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::policy_toml_example;
