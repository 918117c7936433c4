// crates/sigverdict-cli/src/lib.rs
// ============================================================================
// Module: SigVerdict CLI Library
// Description: Shared helpers for the `sigverdict` binary.
// Purpose: Expose localization and audit sinks to the binary and its tests.
// Dependencies: serde_json, sigverdict-core
// ============================================================================

//! ## Overview
//! Library surface of the `sigverdict` command line tool. The binary in
//! `main.rs` owns argument parsing and dispatch; this crate holds the parts
//! that are worth testing on their own.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod i18n;
