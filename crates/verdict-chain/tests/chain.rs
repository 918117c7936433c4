// crates/verdict-chain/tests/chain.rs
// ============================================================================
// Module: Chain Engine Tests
// Description: Tests for ordered evaluation, short-circuit, and trace hooks.
// ============================================================================
//! ## Overview
//! Validates that blocking failures stop evaluation while non-blocking
//! failures are recorded and evaluation continues.

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

mod support;

use std::cell::Cell;

use support::TestResult;
use support::ensure;
use verdict_chain::Chain;
use verdict_chain::ChainConclusion;
use verdict_chain::ChainTrace;
use verdict_chain::Check;
use verdict_chain::CheckResult;
use verdict_chain::CheckStatus;
use verdict_chain::Indication;
use verdict_chain::Level;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Failure codes shared by the tests.
fn revoked() -> Verdict {
    Verdict::indeterminate(SubIndication::RevokedNoPoe)
}

/// Trace that records evaluated check names.
#[derive(Default)]
struct NameTrace {
    /// Names in evaluation order.
    names: Vec<String>,
    /// Number of completion callbacks.
    completed: usize,
}

impl ChainTrace for NameTrace {
    fn on_check_evaluated(&mut self, result: &CheckResult) {
        self.names.push(result.name.clone());
    }

    fn on_chain_completed(&mut self, _conclusion: &ChainConclusion) {
        self.completed += 1;
    }
}

// ============================================================================
// SECTION: Short-Circuit
// ============================================================================

#[test]
fn fail_level_failure_stops_the_chain() -> TestResult {
    let b_ran = Cell::new(false);
    let conclusion = Chain::new("short-circuit")
        .then(Check::new("a", Level::Fail, revoked(), || false))
        .then(Check::new("b", Level::Fail, Verdict::failed(SubIndication::HashFailure), || {
            b_ran.set(true);
            false
        }))
        .evaluate();

    ensure(!b_ran.get(), "check b must not run after a blocking failure")?;
    ensure(!conclusion.executed("b"), "check b must not be recorded")?;
    ensure(conclusion.verdict == revoked(), "verdict comes from the first blocking check")?;
    ensure(conclusion.checks.len() == 1, "only check a is recorded")
}

#[test]
fn warn_level_failure_continues_the_chain() -> TestResult {
    let conclusion = Chain::new("continue")
        .then(Check::new("a", Level::Warn, revoked(), || false))
        .then(Check::new("b", Level::Fail, Verdict::failed(SubIndication::HashFailure), || false))
        .evaluate();

    ensure(conclusion.executed("b"), "check b must be recorded")?;
    ensure(
        conclusion.check("a").map(|result| result.status) == Some(CheckStatus::Warning),
        "check a is a warning",
    )?;
    ensure(
        conclusion.verdict == Verdict::failed(SubIndication::HashFailure),
        "verdict comes from check b",
    )
}

#[test]
fn only_non_blocking_failures_pass() -> TestResult {
    let conclusion = Chain::new("lenient")
        .then(Check::new("warn", Level::Warn, revoked(), || false))
        .then(Check::new("inform", Level::Inform, revoked(), || false))
        .then(Check::new("ignore", Level::Ignore, revoked(), || false))
        .then(Check::new("ok", Level::Fail, revoked(), || true))
        .evaluate();

    ensure(conclusion.is_passed(), "non-blocking failures keep the chain passing")?;
    ensure(conclusion.indication() == Indication::Passed, "indication is PASSED")?;
    ensure(conclusion.sub_indication().is_none(), "no sub-indication on PASSED")?;
    ensure(conclusion.checks.len() == 4, "every check is recorded")
}

#[test]
fn empty_chain_passes() -> TestResult {
    let chain = Chain::new("empty");
    ensure(chain.is_empty(), "no checks queued")?;
    ensure(chain.evaluate().is_passed(), "empty chain passes")
}

#[test]
fn failing_checks_keep_their_codes_and_detail() -> TestResult {
    let conclusion = Chain::new("detail")
        .then(
            Check::new("w", Level::Warn, revoked(), || false)
                .with_title("Is it fine?")
                .with_error_message("It is not fine!")
                .with_detail("certificate C-1"),
        )
        .evaluate();
    let result = conclusion.check("w").ok_or("missing result")?;
    ensure(result.title == "Is it fine?", "title kept")?;
    ensure(result.message.as_deref() == Some("It is not fine!"), "message kept")?;
    ensure(result.failure == Some(revoked()), "failure codes kept")?;
    ensure(result.detail.as_deref() == Some("certificate C-1"), "detail kept")
}

// ============================================================================
// SECTION: Trace Hooks
// ============================================================================

#[test]
fn trace_observes_executed_checks_only() -> TestResult {
    let mut trace = NameTrace::default();
    let mut chain = Chain::new("traced");
    chain.push(Check::new("first", Level::Fail, revoked(), || true));
    chain.push(Check::new("second", Level::Fail, revoked(), || false));
    chain.push(Check::new("third", Level::Fail, revoked(), || true));
    ensure(chain.len() == 3, "three checks queued")?;

    let conclusion = chain.evaluate_with_trace(&mut trace);
    ensure(trace.names == ["first", "second"], "third never runs")?;
    ensure(trace.completed == 1, "completion reported once")?;
    ensure(!conclusion.is_passed(), "chain fails")
}

#[test]
fn conclusion_round_trips_through_json() -> TestResult {
    let conclusion = Chain::new("serde")
        .then(Check::new("w", Level::Warn, revoked(), || false))
        .then(Check::new("f", Level::Fail, Verdict::failed(SubIndication::SigCryptoFailure), || false))
        .evaluate();
    let json = serde_json::to_string(&conclusion)?;
    let back: ChainConclusion = serde_json::from_str(&json)?;
    ensure(back == conclusion, "conclusion survives serialization")
}
