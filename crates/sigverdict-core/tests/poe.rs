// crates/sigverdict-core/tests/poe.rs
// ============================================================================
// Module: Proof of Existence Tests
// Description: Proofs contributed by validated timestamps.
// ============================================================================
//! ## Overview
//! A validated signature timestamp proves its signature existed at the
//! production time; an archive timestamp proves every covered token existed;
//! a content timestamp proves nothing about the signature. Every token also
//! exists at the validation time.

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

use sigverdict_core::PoeProvenance;
use sigverdict_core::PoeSet;
use sigverdict_core::TimestampKind;
use support::SIGNATURE;
use support::TestResult;
use support::ensure;
use support::id;
use support::signature_timestamp;
use support::signing_day;
use support::timestamp;
use support::validation_time;
use time::Duration;

#[test]
fn empty_set_only_knows_the_validation_time() -> TestResult {
    let poe = PoeSet::new(validation_time());
    let proofs = poe.proofs_latest_first(&id(SIGNATURE));
    ensure(proofs.len() == 1, "only the implicit proof should exist")?;
    ensure(
        poe.earliest(&id(SIGNATURE)).provenance == PoeProvenance::ValidationTime,
        "earliest proof should be the validation time",
    )
}

#[test]
fn signature_timestamp_gives_its_own_proof() -> TestResult {
    let poe = PoeSet::new(validation_time()).with_timestamp(&signature_timestamp(signing_day()));
    let earliest = poe.earliest(&id(SIGNATURE));
    ensure(earliest.time == signing_day(), "earliest proof should be the timestamp time")?;
    ensure(
        earliest.provenance
            == PoeProvenance::OwnTimestamp {
                timestamp: id("T-signature"),
            },
        "signature timestamps give own-timestamp provenance",
    )?;
    ensure(poe.has_proof_at_or_before(&id(SIGNATURE), signing_day()), "proof should hold at its own time")?;
    ensure(
        !poe.has_proof_at_or_before(&id(SIGNATURE), signing_day() - Duration::seconds(1)),
        "proof should not hold before its time",
    )
}

#[test]
fn content_timestamp_adds_no_proof() -> TestResult {
    let content = timestamp("T-content", TimestampKind::Content, signing_day(), &[SIGNATURE]);
    let poe = PoeSet::new(validation_time()).with_timestamp(&content);
    ensure(poe == PoeSet::new(validation_time()), "content timestamps must not add proofs")
}

#[test]
fn future_timestamp_is_ignored() -> TestResult {
    let future = signature_timestamp(validation_time() + Duration::days(1));
    let poe = PoeSet::new(validation_time()).with_timestamp(&future);
    ensure(poe == PoeSet::new(validation_time()), "timestamps after the validation time add nothing")
}

#[test]
fn archive_timestamp_covers_every_listed_token() -> TestResult {
    let archive = timestamp("T-archive", TimestampKind::Archive, signing_day(), &[SIGNATURE, "T-signature"]);
    let poe = PoeSet::new(validation_time()).with_timestamp(&archive);
    for covered in [SIGNATURE, "T-signature"] {
        let earliest = poe.earliest(&id(covered));
        ensure(
            earliest.provenance
                == PoeProvenance::CoveringTimestamp {
                    timestamp: id("T-archive"),
                },
            format!("{covered} should be covered by the archive timestamp"),
        )?;
    }
    Ok(())
}

#[test]
fn proofs_are_listed_latest_first() -> TestResult {
    let archive = timestamp("T-archive", TimestampKind::Archive, signing_day() + Duration::days(30), &[SIGNATURE]);
    let poe = PoeSet::new(validation_time())
        .with_timestamp(&signature_timestamp(signing_day()))
        .with_timestamp(&archive);
    let times: Vec<_> = poe.proofs_latest_first(&id(SIGNATURE)).into_iter().map(|proof| proof.time).collect();
    ensure(
        times == vec![validation_time(), signing_day() + Duration::days(30), signing_day()],
        "proofs should be ordered newest first",
    )?;
    ensure(poe.earliest(&id(SIGNATURE)).time == signing_day(), "earliest should be the signature timestamp")
}
