// crates/sigverdict-core/src/runtime/time_sliding.rs
// ============================================================================
// Module: SigVerdict Past Signature Validation
// Description: Control time computation and proof-of-existence search.
// Purpose: Resolve time-sensitive results with earlier proofs of existence.
// Dependencies: time, verdict-chain, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! The control time is the latest time at which the chain is known good. It
//! starts at the validation time (or the trust anchor sunset, if earlier) and
//! walks the chain from the anchor down, moving back to:
//! - the revocation time of a revoked certificate (under
//!   [`ValidationModel::Chain`], CA revocations count only for key compromise
//!   or unspecified reasons);
//! - the issuance time of revocation data that is not fresh at the current
//!   control time;
//! - the expiration of a certificate signature algorithm.
//!
//! Finally the expiration of the token's own algorithms applies.
//!
//! Candidate proofs not after the control time are tried latest first; the
//! first at which XCV and the cryptographic checks pass is the proof. Adding
//! proofs can only add candidates, so more evidence never worsens the result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::constraints::CheckKey;
use crate::core::constraints::ValidationModel;
use crate::core::identifiers::TokenId;
use crate::core::poe::PoeSet;
use crate::core::report::BasicBuildingBlocks;
use crate::core::report::ControlTimeReason;
use crate::core::report::ControlTimeStep;
use crate::core::report::TimeSlidingConclusion;
use crate::core::tokens::CertificateToken;
use crate::runtime::bbb::BbbSubject;
use crate::runtime::bbb::sav;
use crate::runtime::bbb::xcv;
use crate::runtime::chains::CertificateChain;
use crate::runtime::context::PolicyContext;
use crate::runtime::context::ValidationScope;
use crate::runtime::crypto::signature_expiry;
use crate::runtime::precedence::dominant;
use crate::runtime::revocation::latest_revocation;

// ============================================================================
// SECTION: Control Time
// ============================================================================

/// Control time with the adjustments that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlTime {
    /// Current control time.
    pub time: OffsetDateTime,
    /// Adjustments, in application order.
    pub steps: Vec<ControlTimeStep>,
}

impl ControlTime {
    /// Starts at `time` with no adjustment.
    #[must_use]
    pub const fn new(time: OffsetDateTime) -> Self {
        Self {
            time,
            steps: Vec::new(),
        }
    }

    /// Moves the control time back to `time` when it is earlier.
    pub fn lower(&mut self, certificate: Option<&TokenId>, reason: ControlTimeReason, time: OffsetDateTime) {
        if time < self.time {
            self.time = time;
            self.steps.push(ControlTimeStep {
                certificate: certificate.cloned(),
                reason,
                time,
            });
        }
    }
}

/// Computes the control time of `subject` over `chain`.
#[must_use]
pub fn control_time(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    chain: Option<&CertificateChain>,
    subject: BbbSubject<'_>,
    current_time: OffsetDateTime,
) -> ControlTime {
    let policy = ctx.policy();
    let mut control = ControlTime::new(current_time);
    let members: Vec<&CertificateToken> = chain
        .map(|chain| chain.certificates().iter().filter_map(|id| scope.arena.certificate(id)).collect())
        .unwrap_or_default();

    if let Some(top) = members.last()
        && top.trusted
        && let Some(sunset) = top.trust_sunset_date
    {
        control.lower(Some(&top.id), ControlTimeReason::TrustAnchorSunset, sunset);
    }

    for (index, certificate) in members.iter().enumerate().rev() {
        if certificate.trusted {
            continue;
        }
        let skip_revocation = certificate.ocsp_no_check && policy.revocation.skip_ocsp_no_check;
        if !skip_revocation
            && let Some(status) = latest_revocation(scope.arena, &scope.revocation_trust, &certificate.id)
        {
            if status.is_revocation() {
                let counts = policy.model == ValidationModel::Shell
                    || index == 0
                    || status.compromises_key();
                if counts {
                    control.lower(
                        Some(&certificate.id),
                        ControlTimeReason::CertificateRevoked,
                        status.revocation_time(),
                    );
                }
            } else if !status.is_fresh_at(control.time, &policy.revocation) {
                control.lower(
                    Some(&certificate.id),
                    ControlTimeReason::RevocationNotFresh,
                    status.token.this_update,
                );
            }
        }
        if let Some(expires) = signature_expiry(&policy.cryptographic, &certificate.signature).expiration() {
            control.lower(Some(&certificate.id), ControlTimeReason::CertificateCryptography, expires);
        }
    }

    if let Some(expires) = sav::subject_expiry(&policy.cryptographic, subject).expiration() {
        control.lower(None, ControlTimeReason::SignatureCryptography, expires);
    }
    control
}

// ============================================================================
// SECTION: Sliding
// ============================================================================

/// Runs past signature validation for a token whose current verdict is
/// time-sensitive.
#[must_use]
pub fn slide(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    subject: BbbSubject<'_>,
    blocks: &BasicBuildingBlocks,
    current_verdict: Verdict,
    poe: &PoeSet,
) -> TimeSlidingConclusion {
    let signing_certificate = blocks.signing_certificate.as_ref();
    let chain = signing_certificate.and_then(|id| scope.chains.chain_for(id).ok());
    let control = control_time(ctx, scope, chain, subject, poe.validation_time());

    let candidates = if poe.has_proof_at_or_before(subject.id(), control.time) {
        poe.proofs_latest_first(subject.id())
    } else {
        Vec::new()
    };
    let mut proof = None;
    let mut last_failure = None;
    for candidate in candidates.into_iter().filter(|candidate| candidate.time <= control.time) {
        let verdict = verdict_at(ctx, scope, subject, signing_certificate, candidate.time);
        if verdict.is_passed() {
            proof = Some(candidate);
            break;
        }
        last_failure = Some(verdict);
    }

    let failure = without_proof(last_failure.unwrap_or(current_verdict));
    let found = proof.is_some();
    let conclusion = ctx
        .chain("psv")
        .then(ctx.check(CheckKey::PastSignatureValidation, failure, move || found))
        .evaluate();
    TimeSlidingConclusion {
        control_time: control.time,
        control_steps: control.steps,
        proof,
        conclusion,
    }
}

/// Evaluates the time-dependent checks of `subject` at `at`.
#[must_use]
pub fn verdict_at(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    subject: BbbSubject<'_>,
    signing_certificate: Option<&TokenId>,
    at: OffsetDateTime,
) -> Verdict {
    let xcv = xcv::validate(ctx, scope, signing_certificate, subject.context(), at);
    let crypto = sav::crypto_conclusion(ctx, subject, at);
    dominant([xcv.conclusion.verdict, crypto.verdict])
}

/// Maps a verdict that no proof of existence resolved.
const fn without_proof(verdict: Verdict) -> Verdict {
    match verdict.sub_indication() {
        Some(SubIndication::CryptoConstraintsFailureNoPoe) => {
            Verdict::indeterminate(SubIndication::CryptoConstraintsFailure)
        }
        _ => verdict,
    }
}
