// crates/sigverdict-core/src/runtime/bbb/isc.rs
// ============================================================================
// Module: SigVerdict Signing Certificate Identification
// Description: Resolves the signing certificate of a signed token.
// Purpose: Fail with NO_SIGNING_CERTIFICATE_FOUND when it is absent or ambiguous.
// Dependencies: verdict-chain, crate::core, crate::runtime
// ============================================================================

//! ## Overview
//! A signed reference names the certificate directly. Without one, exactly
//! one candidate certificate must be present; several candidates are
//! ambiguous. Revocation tokens name their issuer instead of carrying a
//! signed reference, so the reference checks do not apply to them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use verdict_chain::ChainConclusion;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::constraints::CheckKey;
use crate::core::identifiers::TokenId;
use crate::core::report::BlockContext;
use crate::runtime::bbb::BbbSubject;
use crate::runtime::context::PolicyContext;
use crate::runtime::context::ValidationScope;

// ============================================================================
// SECTION: Identification
// ============================================================================

/// Identifies the signing certificate of `subject`.
///
/// Returns the block conclusion and the identified certificate, if any.
#[must_use]
pub fn identify(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    subject: BbbSubject<'_>,
) -> (ChainConclusion, Option<TokenId>) {
    let reference = subject.reference();
    let signing = match reference {
        Some(reference) => Some(&reference.certificate),
        None => match subject.candidates() {
            [only] => Some(only),
            _ => None,
        },
    }
    .filter(|id| scope.arena.certificate(id).is_some())
    .cloned();

    let failure = Verdict::indeterminate(SubIndication::NoSigningCertificateFound);
    let identified = signing.is_some();
    let mut chain = ctx.chain("isc").then(ctx.check(
        CheckKey::SigningCertificateIdentified,
        failure,
        move || identified,
    ));
    if subject.context() != BlockContext::Revocation {
        let present = reference.is_some();
        chain.push(ctx.check(CheckKey::SigningCertificateReferencePresent, failure, move || present));
    }
    if let Some(reference) = reference {
        chain.push(ctx.check(CheckKey::SigningCertificateDigestMatch, failure, move || {
            reference.digest_match
        }));
        chain.push(ctx.check(CheckKey::SigningCertificateIssuerSerialMatch, failure, move || {
            reference.issuer_serial_match
        }));
    }
    (chain.evaluate(), signing)
}
