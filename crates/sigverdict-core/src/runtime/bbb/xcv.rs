// crates/sigverdict-core/src/runtime/bbb/xcv.rs
// ============================================================================
// Module: SigVerdict X.509 Certificate Validation
// Description: Chain-level and per-certificate checks at a target time.
// Purpose: Validate the signing certificate chain as a pure function of time.
// Dependencies: time, verdict-chain, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! [`validate`] depends only on the arena, the precomputed chains, the
//! policy, and `target_time`; past signature validation calls it repeatedly
//! with earlier times.
//!
//! The chain must exist and end in a trust anchor accepted at the target
//! time. Every other certificate is then checked, signing certificate first,
//! and the first certificate that fails decides the block verdict. Under
//! [`ValidationModel::Chain`] a CA certificate is checked at the issuance time
//! of the certificate below it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use verdict_chain::Chain;
use verdict_chain::ChainConclusion;
use verdict_chain::Level;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::constraints::CheckKey;
use crate::core::constraints::ValidationModel;
use crate::core::identifiers::TokenId;
use crate::core::report::BlockContext;
use crate::core::report::CertificateConclusion;
use crate::core::report::XcvConclusion;
use crate::core::tokens::CertificateToken;
use crate::core::tokens::KeyUsage;
use crate::runtime::chains::CertificateChain;
use crate::runtime::context::PolicyContext;
use crate::runtime::context::ValidationScope;
use crate::runtime::crypto::signature_expiry;
use crate::runtime::revocation::latest_revocation;

// ============================================================================
// SECTION: Chain Validation
// ============================================================================

/// Validates the chain of `signing_certificate` at `target_time`.
#[must_use]
pub fn validate(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    signing_certificate: Option<&TokenId>,
    context: BlockContext,
    target_time: OffsetDateTime,
) -> XcvConclusion {
    let no_chain = Verdict::indeterminate(SubIndication::NoCertificateChainFound);
    let (chain, chain_failure) = match signing_certificate.map(|id| scope.chains.chain_for(id)) {
        Some(Ok(chain)) => (Some(chain), no_chain),
        Some(Err(error)) => (None, error.failure()),
        None => (None, no_chain),
    };
    let top = chain.and_then(CertificateChain::top).and_then(|id| scope.arena.certificate(id));
    let chain_found = chain.is_some();
    let anchor_valid = top.is_some_and(|top| top.is_trust_anchor_at(target_time));
    let anchor_failure = if top.is_some_and(|top| top.trusted) {
        Verdict::indeterminate(SubIndication::NoCertificateChainFoundNoPoe)
    } else {
        no_chain
    };

    let blocked = |key: CheckKey, passed: bool| !passed && ctx.level(key) == Level::Fail;
    let head_blocks = blocked(CheckKey::ProspectiveCertificateChain, chain_found)
        || blocked(CheckKey::TrustAnchorValid, anchor_valid);
    let certificates = match chain {
        Some(chain) if !head_blocks => validate_members(ctx, scope, chain, context, target_time),
        _ => Vec::new(),
    };

    let mut aggregate = ctx
        .chain("xcv")
        .then(ctx.check(CheckKey::ProspectiveCertificateChain, chain_failure, move || chain_found))
        .then(ctx.check(CheckKey::TrustAnchorValid, anchor_failure, move || anchor_valid));
    for member in &certificates {
        let passed = member.conclusion.is_passed();
        aggregate.push(
            ctx.fixed_check("certificate_passed", member.conclusion.verdict, move || passed)
                .with_detail(member.certificate.as_str()),
        );
    }

    XcvConclusion {
        chain: chain.map(|chain| chain.certificates().to_vec()).unwrap_or_default(),
        conclusion: aggregate.evaluate(),
        certificates,
    }
}

/// Validates every non-anchor certificate until the first failure.
fn validate_members(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    chain: &CertificateChain,
    context: BlockContext,
    target_time: OffsetDateTime,
) -> Vec<CertificateConclusion> {
    let members: Vec<&CertificateToken> =
        chain.certificates().iter().filter_map(|id| scope.arena.certificate(id)).collect();
    let mut conclusions = Vec::new();
    for (index, certificate) in members.iter().enumerate() {
        if certificate.trusted {
            continue;
        }
        let at = member_time(ctx, &members, index, target_time);
        let conclusion = validate_certificate(ctx, scope, certificate, index, context, at);
        let passed = conclusion.is_passed();
        conclusions.push(CertificateConclusion {
            certificate: certificate.id.clone(),
            target_time: at,
            conclusion,
        });
        if !passed {
            break;
        }
    }
    conclusions
}

/// Returns the time a chain member is evaluated at.
fn member_time(
    ctx: &PolicyContext<'_>,
    members: &[&CertificateToken],
    index: usize,
    target_time: OffsetDateTime,
) -> OffsetDateTime {
    match (ctx.policy().model, index.checked_sub(1).and_then(|child| members.get(child))) {
        (ValidationModel::Chain, Some(child)) => target_time.min(child.not_before),
        _ => target_time,
    }
}

// ============================================================================
// SECTION: Certificate Validation
// ============================================================================

/// Checks one certificate of a chain at `at`; `index` 0 is the signing certificate.
fn validate_certificate(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    certificate: &CertificateToken,
    index: usize,
    context: BlockContext,
    at: OffsetDateTime,
) -> ChainConclusion {
    let policy = ctx.policy();
    let mut chain =
        Chain::new(ctx.title_with("sub_xcv", &[("certificate", certificate.id.as_str())]));

    chain.push(ctx.check(
        CheckKey::CertificateSignatureIntact,
        Verdict::indeterminate(SubIndication::CertificateChainGeneralFailure),
        move || certificate.signature.intact,
    ));
    let validity_failure = if at < certificate.not_before {
        Verdict::indeterminate(SubIndication::NotYetValid)
    } else if index == 0 {
        Verdict::indeterminate(SubIndication::Expired)
    } else {
        Verdict::indeterminate(SubIndication::OutOfBoundsNoPoe)
    };
    chain.push(ctx.check(CheckKey::CertificateValidityRange, validity_failure, move || {
        certificate.is_valid_at(at)
    }));

    let constraints_failure = Verdict::indeterminate(SubIndication::ChainConstraintsFailure);
    if index == 0 && context == BlockContext::Signature {
        let expected = policy.expected(CheckKey::SigningCertificateKeyUsage).unwrap_or_default();
        chain.push(ctx.check(CheckKey::SigningCertificateKeyUsage, constraints_failure, move || {
            certificate.key_usages.iter().any(|usage| expected.contains(usage.as_str()))
        }));
    }
    if index > 0 {
        chain.push(ctx.check(CheckKey::CaCertificateBasicConstraints, constraints_failure, move || {
            certificate.ca && certificate.key_usages.contains(&KeyUsage::KeyCertSign)
        }));
    }

    if !(certificate.ocsp_no_check && policy.revocation.skip_ocsp_no_check) {
        let status = latest_revocation(scope.arena, &scope.revocation_trust, &certificate.id);
        let pointers = certificate.has_revocation_pointers();
        let try_later = Verdict::indeterminate(SubIndication::TryLater);
        chain.push(ctx.check(
            CheckKey::RevocationInfoAccessPresent,
            Verdict::indeterminate(SubIndication::NoPoe),
            move || pointers,
        ));
        let missing = if pointers { try_later } else { Verdict::indeterminate(SubIndication::NoPoe) };
        chain.push(ctx.check(CheckKey::RevocationDataAvailable, missing, move || status.is_some()));
        let revoked = if index == 0 {
            Verdict::indeterminate(SubIndication::RevokedNoPoe)
        } else {
            Verdict::indeterminate(SubIndication::RevokedCaNoPoe)
        };
        chain.push(ctx.check(CheckKey::CertificateNotRevoked, revoked, move || {
            !status.is_some_and(|status| status.is_revoked_at(at))
        }));
        chain.push(ctx.check(CheckKey::CertificateNotOnHold, try_later, move || {
            !status.is_some_and(|status| status.is_on_hold_at(at))
        }));
        let rules = &policy.revocation;
        chain.push(ctx.check(CheckKey::RevocationFresh, try_later, move || {
            status.is_none_or(|status| status.is_fresh_at(at, rules))
        }));
    }

    let expiry = signature_expiry(&policy.cryptographic, &certificate.signature);
    chain.push(ctx.check(CheckKey::CertificateCryptographic, expiry.failure(), move || {
        expiry.acceptable_at(at)
    }));
    chain.evaluate()
}
