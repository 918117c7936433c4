// crates/verdict-chain/src/tests.rs
// ============================================================================
// Module: Verdict Chain Unit Tests
// Description: Unit coverage for chain internals not visible through the API.
// Purpose: Pin status mapping and message routing of the chain engine.
// Dependencies: verdict-chain
// ============================================================================

//! ## Overview
//! Unit tests for chain status mapping and message routing.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

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

use crate::Chain;
use crate::Check;
use crate::CheckStatus;
use crate::Level;
use crate::SubIndication;
use crate::Verdict;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn failure_status_follows_level() {
    assert_eq!(CheckStatus::for_failure(Level::Fail), CheckStatus::NotOk);
    assert_eq!(CheckStatus::for_failure(Level::Warn), CheckStatus::Warning);
    assert_eq!(CheckStatus::for_failure(Level::Inform), CheckStatus::Information);
    assert_eq!(CheckStatus::for_failure(Level::Ignore), CheckStatus::Ignored);
}

#[test]
fn messages_are_routed_by_level() {
    let failure = Verdict::indeterminate(SubIndication::Generic);
    let conclusion = Chain::new("routing")
        .then(Check::new("warned", Level::Warn, failure, || false).with_error_message("w"))
        .then(Check::new("informed", Level::Inform, failure, || false).with_error_message("i"))
        .then(Check::new("ignored", Level::Ignore, failure, || false).with_error_message("g"))
        .then(Check::new("blocked", Level::Fail, failure, || false).with_error_message("f"))
        .evaluate();

    assert_eq!(conclusion.warnings.len(), 1);
    assert_eq!(conclusion.infos.len(), 2);
    assert_eq!(conclusion.errors.len(), 1);
    assert_eq!(conclusion.errors[0].message, "f");
    assert_eq!(conclusion.verdict, failure);
}

#[test]
fn passing_checks_carry_no_message() {
    let conclusion = Chain::new("quiet")
        .then(Check::new("ok", Level::Fail, Verdict::failed(SubIndication::HashFailure), || true))
        .evaluate();
    let result = conclusion.check("ok").unwrap();
    assert!(result.passed());
    assert!(result.message.is_none());
    assert!(result.failure.is_none());
}
