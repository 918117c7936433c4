// crates/sigverdict-core/src/runtime/precedence.rs
// ============================================================================
// Module: SigVerdict Verdict Precedence
// Description: The single rank table combining simultaneous block failures.
// Purpose: Pick one dominant verdict deterministically wherever verdicts merge.
// Dependencies: verdict-chain, crate::core::report
// ============================================================================

//! ## Overview
//! Ranks, highest first:
//!
//! | Rank | Verdicts |
//! |------|----------|
//! | 7 | `FAILED` with `HASH_FAILURE` or `SIG_CRYPTO_FAILURE` |
//! | 6 | any other `FAILED` |
//! | 5 | `INDETERMINATE` identification failures: `NO_SIGNING_CERTIFICATE_FOUND`, `FORMAT_FAILURE`, `SIGNED_DATA_NOT_FOUND` |
//! | 4 | permanent `INDETERMINATE` codes (policy, chain, constraints, `NO_POE`, ...) |
//! | 3 | time-sensitive `INDETERMINATE` codes other than `TRY_LATER` |
//! | 2 | `TRY_LATER` |
//! | 0 | passing verdicts |
//!
//! Ties keep the earliest verdict in evaluation order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use verdict_chain::Indication;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::report::BasicBuildingBlocks;

// ============================================================================
// SECTION: Ranks
// ============================================================================

/// Returns the precedence rank of `verdict`.
#[must_use]
pub const fn rank(verdict: Verdict) -> u8 {
    match (verdict.indication(), verdict.sub_indication()) {
        (Indication::Passed | Indication::TotalPassed, _) => 0,
        (
            Indication::Failed | Indication::TotalFailed,
            Some(SubIndication::HashFailure | SubIndication::SigCryptoFailure),
        ) => 7,
        (Indication::Failed | Indication::TotalFailed, _) => 6,
        (
            Indication::Indeterminate,
            Some(
                SubIndication::NoSigningCertificateFound
                | SubIndication::FormatFailure
                | SubIndication::SignedDataNotFound,
            ),
        ) => 5,
        (Indication::Indeterminate, Some(SubIndication::TryLater)) => 2,
        (Indication::Indeterminate, Some(sub)) if sub.is_time_sensitive() => 3,
        (Indication::Indeterminate, _) => 4,
    }
}

/// Returns the dominant verdict, or `PASSED` for an empty input.
#[must_use]
pub fn dominant(verdicts: impl IntoIterator<Item = Verdict>) -> Verdict {
    verdicts.into_iter().fold(Verdict::passed(), |best, candidate| {
        if rank(candidate) > rank(best) { candidate } else { best }
    })
}

/// Combines the block conclusions of one building block run.
#[must_use]
pub fn basic_verdict(blocks: &BasicBuildingBlocks) -> Verdict {
    dominant(
        [
            Some(blocks.isc.verdict),
            blocks.vci.as_ref().map(|vci| vci.verdict),
            Some(blocks.xcv.conclusion.verdict),
            Some(blocks.cv.verdict),
            blocks.sav.as_ref().map(|sav| sav.verdict),
        ]
        .into_iter()
        .flatten(),
    )
}
