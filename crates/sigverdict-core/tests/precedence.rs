// crates/sigverdict-core/tests/precedence.rs
// ============================================================================
// Module: Verdict Precedence Tests
// Description: Rank table and tie behavior of the dominant verdict.
// ============================================================================
//! ## Overview
//! Hash and signature value failures outrank every other failure, other
//! failures outrank identification problems, and `TRY_LATER` ranks lowest
//! among indeterminate verdicts. Ties keep the first verdict seen.

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

use sigverdict_core::SubIndication;
use sigverdict_core::Verdict;
use sigverdict_core::runtime::dominant;
use sigverdict_core::runtime::rank;

#[test]
fn rank_table_orders_verdict_classes() {
    let ordered = [
        Verdict::failed(SubIndication::HashFailure),
        Verdict::failed(SubIndication::Revoked),
        Verdict::indeterminate(SubIndication::NoSigningCertificateFound),
        Verdict::indeterminate(SubIndication::CryptoConstraintsFailure),
        Verdict::indeterminate(SubIndication::RevokedNoPoe),
        Verdict::indeterminate(SubIndication::TryLater),
        Verdict::passed(),
    ];
    for pair in ordered.windows(2) {
        assert!(rank(pair[0]) > rank(pair[1]), "{} should outrank {}", pair[0], pair[1]);
    }
}

#[test]
fn hash_failure_dominates_try_later_in_any_order() {
    let hash = Verdict::failed(SubIndication::HashFailure);
    let later = Verdict::indeterminate(SubIndication::TryLater);
    assert_eq!(dominant([later, hash]), hash);
    assert_eq!(dominant([hash, later]), hash);
}

#[test]
fn ties_keep_the_first_verdict() {
    let expired = Verdict::indeterminate(SubIndication::OutOfBoundsNoPoe);
    let revoked = Verdict::indeterminate(SubIndication::RevokedNoPoe);
    assert_eq!(dominant([expired, revoked]), expired);
    assert_eq!(dominant([revoked, expired]), revoked);
}

#[test]
fn empty_input_is_passed() {
    assert_eq!(dominant(std::iter::empty()), Verdict::passed());
}
