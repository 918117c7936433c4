// crates/sigverdict-core/tests/time_sliding.rs
// ============================================================================
// Module: Time Sliding Tests
// Description: Control time computation and monotonicity of past validation.
// ============================================================================
//! ## Overview
//! Checks that a revoked signing certificate is accepted exactly when a
//! validated proof of existence predates the revocation, and that adding
//! proofs never turns a passing signature into a failing one.

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

use proptest::prelude::*;
use sigverdict_core::ControlTimeReason;
use sigverdict_core::Indication;
use sigverdict_core::SubIndication;
use sigverdict_core::TimestampKind;
use support::SIGNATURE;
use support::TestResult;
use support::ensure;
use support::revoked_with_timestamp;
use support::signature_report;
use support::timestamp;
use support::validate;
use time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Revocation time used by the properties.
const fn revocation_time() -> OffsetDateTime {
    datetime!(2025-01-01 0:00 UTC)
}

/// Returns a time `hours` after 2024-02-01.
fn hours_after_issuance(hours: i64) -> OffsetDateTime {
    datetime!(2024-02-01 0:00 UTC) + Duration::hours(hours)
}

/// Returns true when the baseline signature passes with the given proofs.
fn passes_with(revoked_at: OffsetDateTime, signature_ts: OffsetDateTime, archive_ts: Option<OffsetDateTime>) -> TestResult<bool> {
    let mut data = revoked_with_timestamp(revoked_at, signature_ts);
    if let Some(at) = archive_ts {
        data.timestamps.push(timestamp("T-archive", TimestampKind::Archive, at, &[SIGNATURE]));
    }
    let report = validate(data)?;
    Ok(signature_report(&report)?.verdict.indication() == Indication::TotalPassed)
}

// ============================================================================
// SECTION: Control Time
// ============================================================================

#[test]
fn control_time_records_the_revocation_step() -> TestResult {
    let timestamp_at = revocation_time() - Duration::days(30);
    let report = validate(revoked_with_timestamp(revocation_time(), timestamp_at))?;
    let signature = signature_report(&report)?;
    let sliding = signature.time_sliding.as_ref().ok_or("time sliding should run")?;
    ensure(sliding.control_time == revocation_time(), "control time should be the revocation time")?;
    ensure(
        sliding.control_steps.iter().any(|step| step.reason == ControlTimeReason::CertificateRevoked),
        "the revocation step should be recorded",
    )
}

#[test]
fn proof_at_the_revocation_instant_does_not_pass() -> TestResult {
    let report = validate(revoked_with_timestamp(revocation_time(), revocation_time()))?;
    let signature = signature_report(&report)?;
    ensure(
        signature.verdict.has_sub_indication(SubIndication::RevokedNoPoe),
        format!("expected REVOKED_NO_POE, got {}", signature.verdict),
    )
}

#[test]
fn proofs_after_the_control_time_are_not_candidates() -> TestResult {
    let timestamp_at = revocation_time() + Duration::days(30);
    let report = validate(revoked_with_timestamp(revocation_time(), timestamp_at))?;
    let signature = signature_report(&report)?;
    let sliding = signature.time_sliding.as_ref().ok_or("time sliding should run")?;
    ensure(sliding.proof.is_none(), "no proof should be selected after the control time")?;
    ensure(
        signature.verdict.has_sub_indication(SubIndication::RevokedNoPoe),
        format!("expected REVOKED_NO_POE, got {}", signature.verdict),
    )
}

// ============================================================================
// SECTION: Monotonicity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn proof_before_revocation_passes_and_after_fails(hours in 0_i64..14_000) {
        let proof = hours_after_issuance(hours);
        let passed = passes_with(revocation_time(), proof, None)
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        prop_assert_eq!(passed, proof < revocation_time());
    }

    #[test]
    fn additional_proofs_never_worsen_the_verdict(
        first in 0_i64..14_000,
        second in 0_i64..14_000,
    ) {
        let signature_ts = hours_after_issuance(first);
        let archive_ts = hours_after_issuance(second);
        let alone = passes_with(revocation_time(), signature_ts, None)
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        let together = passes_with(revocation_time(), signature_ts, Some(archive_ts))
            .map_err(|error| TestCaseError::fail(error.to_string()))?;
        prop_assert!(!alone || together);
    }
}
