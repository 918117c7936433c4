// crates/sigverdict-core/src/runtime/structure.rs
// ============================================================================
// Module: SigVerdict Structural Checks
// Description: Per-token detection of fact model defects.
// Purpose: Separate malformed input from policy-driven indeterminate results.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A token is malformed when a reference names a token of the wrong kind, or
//! when a signed token offers neither a signing certificate reference nor a
//! candidate certificate. A reference to an identity absent from the pool is
//! not a defect; identification reports it as a missing signing certificate.
//!
//! Defects abort only the affected token.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::arena::FactModelError;
use crate::core::arena::TokenArena;
use crate::core::identifiers::TokenId;
use crate::core::identifiers::TokenKind;
use crate::core::tokens::RevocationToken;
use crate::core::tokens::SignatureToken;
use crate::core::tokens::SignedData;
use crate::core::tokens::TimestampToken;

// ============================================================================
// SECTION: Token Checks
// ============================================================================

/// Returns the defect of a signature, if any.
#[must_use]
pub fn signature_defect(arena: &TokenArena, signature: &SignatureToken) -> Option<FactModelError> {
    signed_data_defect(arena, &signature.signed_data)
        .map(|reason| malformed(&signature.id, TokenKind::Signature, reason))
}

/// Returns the defect of a timestamp, if any.
#[must_use]
pub fn timestamp_defect(arena: &TokenArena, timestamp: &TimestampToken) -> Option<FactModelError> {
    signed_data_defect(arena, &timestamp.signed_data)
        .map(|reason| malformed(&timestamp.id, TokenKind::Timestamp, reason))
}

/// Returns the defect of a revocation token, if any.
#[must_use]
pub fn revocation_defect(arena: &TokenArena, revocation: &RevocationToken) -> Option<FactModelError> {
    let issuer = revocation
        .issuer_certificate
        .as_ref()
        .and_then(|issuer| wrong_kind(arena, issuer, "issuer certificate"));
    let entries = || {
        revocation
            .entries
            .iter()
            .find_map(|entry| wrong_kind(arena, &entry.certificate, "revocation entry"))
    };
    issuer
        .or_else(entries)
        .map(|reason| malformed(&revocation.id, TokenKind::Revocation, reason))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Checks the signer references of signed data.
fn signed_data_defect(arena: &TokenArena, signed_data: &SignedData) -> Option<String> {
    if let Some(reference) = &signed_data.signing_certificate_reference
        && let Some(reason) = wrong_kind(arena, &reference.certificate, "signing certificate reference")
    {
        return Some(reason);
    }
    if let Some(reason) = signed_data
        .candidate_certificates
        .iter()
        .find_map(|candidate| wrong_kind(arena, candidate, "candidate certificate"))
    {
        return Some(reason);
    }
    if signed_data.signing_certificate_reference.is_none()
        && signed_data.candidate_certificates.is_empty()
    {
        return Some("no signing certificate reference and no candidate certificate".to_string());
    }
    None
}

/// Describes a reference that resolves to a non-certificate token.
fn wrong_kind(arena: &TokenArena, id: &TokenId, role: &str) -> Option<String> {
    arena
        .kind_of(id)
        .filter(|kind| *kind != TokenKind::Certificate)
        .map(|kind| format!("{role} {id} refers to a {kind}"))
}

/// Builds the malformed-token error.
fn malformed(id: &TokenId, kind: TokenKind, reason: String) -> FactModelError {
    FactModelError::MalformedToken {
        id: id.clone(),
        kind,
        reason,
    }
}
