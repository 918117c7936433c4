// crates/sigverdict-core/src/runtime/bbb/cv.rs
// ============================================================================
// Module: SigVerdict Cryptographic Verification
// Description: Signed data presence, digest integrity, and signature value checks.
// Purpose: Produce HASH_FAILURE and SIG_CRYPTO_FAILURE outcomes.
// Dependencies: verdict-chain, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! Signatures and timestamps must reference at least one signed data object;
//! revocation tokens carry no separate data objects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use verdict_chain::ChainConclusion;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::constraints::CheckKey;
use crate::core::report::BlockContext;
use crate::runtime::bbb::BbbSubject;
use crate::runtime::context::PolicyContext;

// ============================================================================
// SECTION: Verification
// ============================================================================

/// Runs cryptographic verification for `subject`.
#[must_use]
pub fn verify(ctx: &PolicyContext<'_>, subject: BbbSubject<'_>) -> ChainConclusion {
    let matchers = subject.digest_matchers();
    let needs_data = subject.context() != BlockContext::Revocation;
    let found = (!needs_data || !matchers.is_empty()) && matchers.iter().all(|matcher| matcher.data_found);
    let intact = matchers.iter().all(|matcher| matcher.data_intact);
    let signature_intact = subject.basic_signature().intact;

    ctx.chain("cv")
        .then(ctx.check(
            CheckKey::ReferenceDataFound,
            Verdict::indeterminate(SubIndication::SignedDataNotFound),
            move || found,
        ))
        .then(ctx.check(
            CheckKey::ReferenceDataIntact,
            Verdict::failed(SubIndication::HashFailure),
            move || intact,
        ))
        .then(ctx.check(
            CheckKey::SignatureIntact,
            Verdict::failed(SubIndication::SigCryptoFailure),
            move || signature_intact,
        ))
        .evaluate()
}
