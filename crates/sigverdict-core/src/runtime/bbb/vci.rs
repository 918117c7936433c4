// crates/sigverdict-core/src/runtime/bbb/vci.rs
// ============================================================================
// Module: SigVerdict Validation Context Initialization
// Description: Resolves the effective signature policy of a signature.
// Purpose: Reject unavailable or unaccepted signature policies.
// Dependencies: verdict-chain, crate::core, crate::runtime::context
// ============================================================================

//! ## Overview
//! The accepted set may list explicit identifiers plus the markers
//! `ANY_POLICY` (any explicit or implicit policy), `IMPLICIT_POLICY`, and
//! `NO_POLICY` (no declaration at all).

// ============================================================================
// SECTION: Imports
// ============================================================================

use verdict_chain::ChainConclusion;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::constraints::ANY_POLICY;
use crate::core::constraints::CheckKey;
use crate::core::constraints::IMPLICIT_POLICY;
use crate::core::constraints::NO_POLICY;
use crate::core::tokens::SignatureToken;
use crate::runtime::context::PolicyContext;

// ============================================================================
// SECTION: Initialization
// ============================================================================

/// Runs validation context initialization for `signature`.
#[must_use]
pub fn initialize(ctx: &PolicyContext<'_>, signature: &SignatureToken) -> ChainConclusion {
    let policy = ctx.policy();
    let accepted = policy.expected(CheckKey::SignaturePolicyAccepted).unwrap_or_default();
    let declaration = signature.policy.as_ref();

    let available = match declaration {
        None => !policy.signature_policy.required,
        Some(declaration) => declaration.implicit || declaration.document_available,
    };
    let is_accepted = match declaration {
        None => accepted.contains(NO_POLICY),
        Some(declaration) if declaration.implicit => {
            accepted.contains(IMPLICIT_POLICY) || accepted.contains(ANY_POLICY)
        }
        Some(declaration) => declaration
            .identifier
            .as_deref()
            .is_some_and(|identifier| accepted.contains(identifier) || accepted.contains(ANY_POLICY)),
    };
    let digest_valid = declaration.and_then(|declaration| declaration.digest_match).unwrap_or(true);

    let processing_error = Verdict::indeterminate(SubIndication::PolicyProcessingError);
    ctx.chain("vci")
        .then(ctx.check(
            CheckKey::SignaturePolicyAvailable,
            Verdict::indeterminate(SubIndication::SignaturePolicyNotAvailable),
            move || available,
        ))
        .then(ctx.check(CheckKey::SignaturePolicyAccepted, processing_error, move || is_accepted))
        .then(ctx.check(CheckKey::SignaturePolicyHashValid, processing_error, move || digest_valid))
        .evaluate()
}
