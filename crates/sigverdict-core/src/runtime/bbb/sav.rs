// crates/sigverdict-core/src/runtime/bbb/sav.rs
// ============================================================================
// Module: SigVerdict Signature Acceptance Validation
// Description: Structural, format, and cryptographic strength constraints.
// Purpose: Decide whether an intact signature is acceptable under the policy.
// Dependencies: time, verdict-chain, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! Structural and format checks apply to signatures only. The cryptographic
//! checks apply to every subject and are also re-run by past signature
//! validation at earlier proofs of existence ([`crypto_conclusion`]).

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use verdict_chain::ChainConclusion;
use verdict_chain::Check;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::constraints::CheckKey;
use crate::core::constraints::CryptographicRules;
use crate::runtime::bbb::BbbSubject;
use crate::runtime::context::PolicyContext;
use crate::runtime::crypto::AlgorithmExpiry;
use crate::runtime::crypto::digest_expiry;
use crate::runtime::crypto::signature_expiry;

// ============================================================================
// SECTION: Acceptance
// ============================================================================

/// Runs signature acceptance validation for `subject` at `target_time`.
#[must_use]
pub fn accept(
    ctx: &PolicyContext<'_>,
    subject: BbbSubject<'_>,
    target_time: OffsetDateTime,
) -> ChainConclusion {
    let mut chain = ctx.chain("sav");
    if let BbbSubject::Signature(signature) = subject {
        let structural = signature.structurally_valid;
        chain.push(ctx.check(
            CheckKey::StructuralValidation,
            Verdict::indeterminate(SubIndication::SigConstraintsFailure),
            move || structural,
        ));
        let format_accepted = ctx.policy().expected(CheckKey::SignatureFormatAccepted).is_none_or(
            |formats| signature.format.as_deref().is_some_and(|format| formats.contains(format)),
        );
        chain.push(ctx.check(
            CheckKey::SignatureFormatAccepted,
            Verdict::indeterminate(SubIndication::FormatFailure),
            move || format_accepted,
        ));
        let signing_time = signature.claimed_signing_time.is_some();
        chain.push(ctx.check(
            CheckKey::SigningTimePresent,
            Verdict::indeterminate(SubIndication::SigConstraintsFailure),
            move || signing_time,
        ));
    }
    for check in crypto_checks(ctx, subject, target_time) {
        chain.push(check);
    }
    chain.evaluate()
}

/// Runs only the cryptographic checks for `subject` at `target_time`.
#[must_use]
pub fn crypto_conclusion(
    ctx: &PolicyContext<'_>,
    subject: BbbSubject<'_>,
    target_time: OffsetDateTime,
) -> ChainConclusion {
    let mut chain = ctx.chain("sav");
    for check in crypto_checks(ctx, subject, target_time) {
        chain.push(check);
    }
    chain.evaluate()
}

/// Builds the signature and digest algorithm checks.
fn crypto_checks<'c>(
    ctx: &PolicyContext<'_>,
    subject: BbbSubject<'_>,
    target_time: OffsetDateTime,
) -> [Check<'c>; 2] {
    let rules = &ctx.policy().cryptographic;
    let signature = signature_expiry(rules, subject.basic_signature());
    let digests = reference_digest_expiry(rules, subject);
    [
        ctx.check(CheckKey::SignatureCryptographic, signature.failure(), move || {
            signature.acceptable_at(target_time)
        }),
        ctx.check(CheckKey::ReferenceDigestCryptographic, digests.failure(), move || {
            digests.acceptable_at(target_time)
        }),
    ]
}

// ============================================================================
// SECTION: Expiry
// ============================================================================

/// Returns the strictest expiry over the declared signed data digests.
fn reference_digest_expiry(rules: &CryptographicRules, subject: BbbSubject<'_>) -> AlgorithmExpiry {
    subject
        .digest_matchers()
        .iter()
        .filter_map(|matcher| matcher.algorithm)
        .map(|algorithm| digest_expiry(rules, Some(algorithm)))
        .fold(AlgorithmExpiry::Never, AlgorithmExpiry::combine)
}

/// Returns the expiry of every algorithm the subject itself relies on.
#[must_use]
pub fn subject_expiry(rules: &CryptographicRules, subject: BbbSubject<'_>) -> AlgorithmExpiry {
    signature_expiry(rules, subject.basic_signature()).combine(reference_digest_expiry(rules, subject))
}
