// crates/sigverdict-core/src/runtime/process/basic.rs
// ============================================================================
// Module: SigVerdict Basic Signature Process
// Description: Basic validation of one signature at the current time.
// Purpose: Turn content timestamps into definitive revocation or expiry failures.
// Dependencies: verdict-chain, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! A validated content timestamp proves the signed content existed no earlier
//! than its production time, so the signature cannot predate it. When the
//! signing certificate is revoked or expired and a validated content
//! timestamp was produced after that event, the signature was necessarily
//! created with an unusable certificate and the result is final.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use time::OffsetDateTime;
use verdict_chain::ChainConclusion;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::constraints::CheckKey;
use crate::core::identifiers::TokenId;
use crate::core::report::BasicBuildingBlocks;
use crate::core::tokens::SignatureToken;
use crate::core::tokens::TimestampKind;
use crate::runtime::context::PolicyContext;
use crate::runtime::context::ValidationScope;
use crate::runtime::precedence::basic_verdict;
use crate::runtime::revocation::latest_revocation;

// ============================================================================
// SECTION: Process
// ============================================================================

/// Runs the basic validation process for `signature`.
#[must_use]
pub fn validate_basic(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    signature: &SignatureToken,
    blocks: &BasicBuildingBlocks,
    timestamp_verdicts: &BTreeMap<TokenId, Verdict>,
) -> ChainConclusion {
    let content_times: Vec<OffsetDateTime> = scope
        .arena
        .timestamps_covering(&signature.id)
        .filter(|timestamp| timestamp.kind == TimestampKind::Content)
        .filter(|timestamp| timestamp_verdicts.get(&timestamp.id).is_some_and(Verdict::is_passed))
        .map(|timestamp| timestamp.production_time)
        .collect();
    let signing = blocks.signing_certificate.as_ref().and_then(|id| scope.arena.certificate(id));
    let xcv = blocks.xcv.conclusion.verdict;

    let mut chain = ctx.chain("basic");
    if xcv.has_sub_indication(SubIndication::RevokedNoPoe) {
        let revoked_at = signing
            .and_then(|certificate| {
                latest_revocation(scope.arena, &scope.revocation_trust, &certificate.id)
            })
            .filter(|status| status.is_revocation())
            .map(|status| status.revocation_time());
        let before = revoked_at.is_none_or(|at| content_times.iter().all(|time| *time < at));
        chain.push(ctx.check(
            CheckKey::ContentTimestampBeforeRevocation,
            Verdict::failed(SubIndication::Revoked),
            move || before,
        ));
    }
    let expired = [
        SubIndication::Expired,
        SubIndication::OutOfBoundsNoPoe,
        SubIndication::OutOfBoundsNotRevoked,
    ]
    .into_iter()
    .any(|sub| xcv.has_sub_indication(sub));
    if expired {
        let not_after = signing.map(|certificate| certificate.not_after);
        let before = not_after.is_none_or(|at| content_times.iter().all(|time| *time <= at));
        chain.push(ctx.check(
            CheckKey::ContentTimestampBeforeExpiration,
            Verdict::failed(SubIndication::Expired),
            move || before,
        ));
    }

    let verdict = basic_verdict(blocks);
    let passed = verdict.is_passed();
    chain.push(ctx.fixed_check("building_blocks_passed", verdict, move || passed));
    chain.evaluate()
}
