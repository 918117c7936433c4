// crates/sigverdict-core/src/runtime/bbb/mod.rs
// ============================================================================
// Module: SigVerdict Basic Building Blocks
// Description: The five per-token building blocks and their aggregate.
// Purpose: Evaluate one signed token at one target time.
// Dependencies: time, verdict-chain, crate::core, crate::runtime::context
// ============================================================================

//! ## Overview
//! [`run_building_blocks`] runs, in order: identification of the signing
//! certificate (ISC), validation context initialization (VCI, signatures
//! only), X.509 certificate validation (XCV), cryptographic verification
//! (CV), and signature acceptance validation (SAV, only when CV passed).
//! Each block re-derives what it needs from the fact model, so an earlier
//! failure never prevents a later block from running. The aggregate
//! conclusion reports the failing block that dominates under
//! [`crate::runtime::precedence`], the same rule that decides the token
//! verdict.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod cv;
pub mod isc;
pub mod sav;
pub mod vci;
pub mod xcv;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Reverse;

use time::OffsetDateTime;
use verdict_chain::ChainConclusion;

use crate::core::identifiers::TokenId;
use crate::core::report::BasicBuildingBlocks;
use crate::core::report::BlockContext;
use crate::core::tokens::BasicSignature;
use crate::core::tokens::DigestMatcher;
use crate::core::tokens::RevocationToken;
use crate::core::tokens::SignatureToken;
use crate::core::tokens::SigningCertificateReference;
use crate::core::tokens::TimestampToken;
use crate::runtime::context::PolicyContext;
use crate::runtime::context::ValidationScope;
use crate::runtime::precedence::rank;

// ============================================================================
// SECTION: Subjects
// ============================================================================

/// Token evaluated by the building blocks.
#[derive(Debug, Clone, Copy)]
pub enum BbbSubject<'a> {
    /// A signature.
    Signature(&'a SignatureToken),
    /// A timestamp.
    Timestamp(&'a TimestampToken),
    /// A CRL or OCSP response.
    Revocation(&'a RevocationToken),
}

impl<'a> BbbSubject<'a> {
    /// Returns the token identity.
    #[must_use]
    pub const fn id(&self) -> &'a TokenId {
        match *self {
            Self::Signature(signature) => &signature.id,
            Self::Timestamp(timestamp) => &timestamp.id,
            Self::Revocation(revocation) => &revocation.id,
        }
    }

    /// Returns the evaluation context.
    #[must_use]
    pub const fn context(&self) -> BlockContext {
        match *self {
            Self::Signature(_) => BlockContext::Signature,
            Self::Timestamp(_) => BlockContext::Timestamp,
            Self::Revocation(_) => BlockContext::Revocation,
        }
    }

    /// Returns the signed signing-certificate reference, if any.
    #[must_use]
    pub const fn reference(&self) -> Option<&'a SigningCertificateReference> {
        match *self {
            Self::Signature(signature) => signature.signed_data.signing_certificate_reference.as_ref(),
            Self::Timestamp(timestamp) => timestamp.signed_data.signing_certificate_reference.as_ref(),
            Self::Revocation(_) => None,
        }
    }

    /// Returns the candidate signing certificates.
    #[must_use]
    pub fn candidates(&self) -> &'a [TokenId] {
        match *self {
            Self::Signature(signature) => &signature.signed_data.candidate_certificates,
            Self::Timestamp(timestamp) => &timestamp.signed_data.candidate_certificates,
            Self::Revocation(revocation) => revocation.issuer_certificate.as_slice(),
        }
    }

    /// Returns the signature value properties.
    #[must_use]
    pub const fn basic_signature(&self) -> &'a BasicSignature {
        match *self {
            Self::Signature(signature) => &signature.signed_data.basic_signature,
            Self::Timestamp(timestamp) => &timestamp.signed_data.basic_signature,
            Self::Revocation(revocation) => &revocation.signature,
        }
    }

    /// Returns the digests over signed content; a timestamp's message
    /// imprint comes first.
    #[must_use]
    pub fn digest_matchers(&self) -> Vec<&'a DigestMatcher> {
        match *self {
            Self::Signature(signature) => signature.signed_data.digest_matchers.iter().collect(),
            Self::Timestamp(timestamp) => std::iter::once(&timestamp.message_imprint)
                .chain(timestamp.signed_data.digest_matchers.iter())
                .collect(),
            Self::Revocation(_) => Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Building Blocks
// ============================================================================

/// Runs every building block for `subject` at `target_time`.
#[must_use]
pub fn run_building_blocks(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    subject: BbbSubject<'_>,
    target_time: OffsetDateTime,
) -> BasicBuildingBlocks {
    let (isc, signing_certificate) = isc::identify(ctx, scope, subject);
    let vci = match subject {
        BbbSubject::Signature(signature) => Some(vci::initialize(ctx, signature)),
        BbbSubject::Timestamp(_) | BbbSubject::Revocation(_) => None,
    };
    let xcv = xcv::validate(ctx, scope, signing_certificate.as_ref(), subject.context(), target_time);
    let cv = cv::verify(ctx, subject);
    let sav = cv.is_passed().then(|| sav::accept(ctx, subject, target_time));

    let conclusion = aggregate(ctx, &isc, vci.as_ref(), &xcv.conclusion, &cv, sav.as_ref());
    BasicBuildingBlocks {
        token_id: subject.id().clone(),
        context: subject.context(),
        signing_certificate,
        isc,
        vci,
        xcv,
        cv,
        sav,
        conclusion,
    }
}

/// Folds block conclusions into one chain under the precedence table.
///
/// Passing blocks are recorded in evaluation order, then failing blocks by
/// descending rank, so the chain stops at the dominant failure. The sort is
/// stable, which keeps the earliest block on equal ranks.
fn aggregate(
    ctx: &PolicyContext<'_>,
    isc: &ChainConclusion,
    vci: Option<&ChainConclusion>,
    xcv: &ChainConclusion,
    cv: &ChainConclusion,
    sav: Option<&ChainConclusion>,
) -> ChainConclusion {
    let mut blocks: Vec<(&str, &ChainConclusion)> = [
        ("isc_passed", Some(isc)),
        ("vci_passed", vci),
        ("xcv_passed", Some(xcv)),
        ("cv_passed", Some(cv)),
        ("sav_passed", sav),
    ]
    .into_iter()
    .filter_map(|(name, block)| block.map(|block| (name, block)))
    .collect();
    blocks.sort_by_key(|(_, block)| (!block.is_passed(), Reverse(rank(block.verdict))));

    let mut chain = ctx.chain("bbb");
    for (name, block) in blocks {
        let passed = block.is_passed();
        chain.push(ctx.fixed_check(name, block.verdict, move || passed));
    }
    chain.evaluate()
}
