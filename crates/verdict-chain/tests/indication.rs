// crates/verdict-chain/tests/indication.rs
// ============================================================================
// Module: Verdict Taxonomy Tests
// Description: Tests for the indication/sub-indication mapping table.
// Purpose: Prove every constructible verdict is consistent with the table.
// ============================================================================
//! ## Overview
//! Property and table tests for verdict construction and serialization.

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
    reason = "Test-only assertions and helpers are permitted."
)]

mod support;

use proptest::prelude::*;
use support::TestResult;
use support::ensure;
use verdict_chain::Indication;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;
use verdict_chain::VerdictError;

// ============================================================================
// SECTION: Strategies
// ============================================================================

/// Any sub-indication.
fn any_sub() -> impl Strategy<Value = SubIndication> {
    (0..SubIndication::ALL.len()).prop_map(|index| SubIndication::ALL[index])
}

/// Any indication.
fn any_indication() -> impl Strategy<Value = Indication> {
    (0..Indication::ALL.len()).prop_map(|index| Indication::ALL[index])
}

/// Asserts the table invariant for a verdict.
fn consistent(verdict: Verdict) -> bool {
    match verdict.sub_indication() {
        Some(sub) => {
            verdict.indication().requires_sub_indication()
                && sub.allowed_under(verdict.indication())
        }
        None => !verdict.indication().requires_sub_indication(),
    }
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn infallible_constructors_are_consistent(sub in any_sub()) {
        prop_assert!(consistent(Verdict::failed(sub)));
        prop_assert!(consistent(Verdict::indeterminate(sub)));
        prop_assert!(consistent(Verdict::failed(sub).to_total()));
        prop_assert!(consistent(Verdict::indeterminate(sub).to_total()));
    }

    #[test]
    fn explicit_pairs_are_accepted_iff_consistent(
        indication in any_indication(),
        sub in proptest::option::of(any_sub()),
    ) {
        match Verdict::new(indication, sub) {
            Ok(verdict) => prop_assert!(consistent(verdict)),
            Err(_) => {
                let allowed = match sub {
                    Some(sub) => indication.requires_sub_indication() && sub.allowed_under(indication),
                    None => !indication.requires_sub_indication(),
                };
                prop_assert!(!allowed);
            }
        }
    }

    #[test]
    fn every_sub_indication_has_a_home(sub in any_sub()) {
        prop_assert!(sub.allowed_under(sub.owning_indication()));
        prop_assert!(!sub.allowed_under(Indication::Passed));
        prop_assert!(!sub.allowed_under(Indication::TotalPassed));
    }
}

// ============================================================================
// SECTION: Table Tests
// ============================================================================

#[test]
fn failed_only_codes_never_become_indeterminate() -> TestResult {
    for sub in [SubIndication::HashFailure, SubIndication::SigCryptoFailure, SubIndication::Revoked] {
        ensure(
            Verdict::indeterminate(sub).indication() == Indication::Failed,
            format!("{sub} stays FAILED"),
        )?;
    }
    Ok(())
}

#[test]
fn indeterminate_only_codes_never_become_failed() -> TestResult {
    for sub in [SubIndication::TryLater, SubIndication::RevokedNoPoe, SubIndication::NoPoe] {
        ensure(
            Verdict::failed(sub).indication() == Indication::Indeterminate,
            format!("{sub} stays INDETERMINATE"),
        )?;
    }
    Ok(())
}

#[test]
fn shared_codes_honour_the_requested_indication() -> TestResult {
    for sub in [SubIndication::Expired, SubIndication::NotYetValid, SubIndication::FormatFailure] {
        ensure(Verdict::failed(sub).indication() == Indication::Failed, "FAILED honoured")?;
        ensure(
            Verdict::indeterminate(sub).indication() == Indication::Indeterminate,
            "INDETERMINATE honoured",
        )?;
    }
    Ok(())
}

#[test]
fn total_failed_keeps_the_failed_code() -> TestResult {
    let total = Verdict::failed(SubIndication::HashFailure).to_total();
    ensure(total.indication() == Indication::TotalFailed, "TOTAL_FAILED")?;
    ensure(total.has_sub_indication(SubIndication::HashFailure), "HASH_FAILURE kept")?;
    ensure(Verdict::passed().to_total().indication() == Indication::TotalPassed, "TOTAL_PASSED")
}

#[test]
fn time_sensitivity_requires_indeterminate() -> TestResult {
    ensure(Verdict::indeterminate(SubIndication::RevokedNoPoe).is_time_sensitive(), "revoked")?;
    ensure(Verdict::indeterminate(SubIndication::TryLater).is_time_sensitive(), "try later")?;
    ensure(!Verdict::failed(SubIndication::Expired).is_time_sensitive(), "failed expired")?;
    ensure(!Verdict::indeterminate(SubIndication::NoPoe).is_time_sensitive(), "no poe")
}

#[test]
fn explicit_pair_errors_name_the_problem() -> TestResult {
    ensure(
        Verdict::new(Indication::Failed, None)
            == Err(VerdictError::MissingSubIndication {
                indication: Indication::Failed,
            }),
        "missing",
    )?;
    ensure(
        matches!(
            Verdict::new(Indication::Passed, Some(SubIndication::Generic)),
            Err(VerdictError::UnexpectedSubIndication { .. })
        ),
        "unexpected",
    )?;
    ensure(
        matches!(
            Verdict::new(Indication::Indeterminate, Some(SubIndication::HashFailure)),
            Err(VerdictError::InconsistentSubIndication { .. })
        ),
        "inconsistent",
    )
}

#[test]
fn serialized_verdicts_are_validated() -> TestResult {
    let json = serde_json::to_string(&Verdict::indeterminate(SubIndication::TryLater))?;
    ensure(json == r#"{"indication":"INDETERMINATE","sub_indication":"TRY_LATER"}"#, "wire form")?;
    let bad = r#"{"indication":"PASSED","sub_indication":"HASH_FAILURE"}"#;
    ensure(serde_json::from_str::<Verdict>(bad).is_err(), "inconsistent pair rejected")?;
    let passed: Verdict = serde_json::from_str(r#"{"indication":"PASSED"}"#)?;
    ensure(passed == Verdict::passed(), "PASSED parses")
}
