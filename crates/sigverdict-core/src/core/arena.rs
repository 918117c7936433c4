// crates/sigverdict-core/src/core/arena.rs
// ============================================================================
// Module: SigVerdict Token Arena
// Description: Diagnostic fact model input and the identity-indexed arena.
// Purpose: Index every token once per run and precompute cross-token lookups.
// Dependencies: serde, thiserror, crate::core::{identifiers, tokens}
// ============================================================================

//! ## Overview
//! [`DiagnosticData`] is the wire form produced by the extraction layer.
//! [`TokenArena::build`] consumes it, rejects duplicate identities and
//! identities that do not match the token's encoded content (both whole-run
//! errors), and precomputes:
//! - certificate -> revocation tokens that carry an entry for it;
//! - token -> timestamps that cover it.
//!
//! Dangling references are not rejected here; they make only the affected
//! token malformed and are reported by the orchestrators.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::TokenId;
use crate::core::identifiers::TokenKind;
use crate::core::tokens::CertificateToken;
use crate::core::tokens::RevocationEntry;
use crate::core::tokens::RevocationToken;
use crate::core::tokens::SignatureToken;
use crate::core::tokens::TimestampToken;

// ============================================================================
// SECTION: Fact Model
// ============================================================================

/// Diagnostic fact model produced by the extraction layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticData {
    /// Certificates.
    #[serde(default)]
    pub certificates: Vec<CertificateToken>,
    /// CRLs and OCSP responses.
    #[serde(default)]
    pub revocations: Vec<RevocationToken>,
    /// Timestamps.
    #[serde(default)]
    pub timestamps: Vec<TimestampToken>,
    /// Signatures.
    #[serde(default)]
    pub signatures: Vec<SignatureToken>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fact model errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactModelError {
    /// Two tokens share one identity.
    #[error("duplicate token identity {id} ({first} and {second})")]
    DuplicateTokenId {
        /// Repeated identity.
        id: TokenId,
        /// Kind of the first occurrence.
        first: TokenKind,
        /// Kind of the second occurrence.
        second: TokenKind,
    },
    /// A token's identity is not the digest of its encoded content.
    #[error("{kind} identity {id} does not match its encoded content (expected {expected})")]
    IdentityMismatch {
        /// Declared identity.
        id: TokenId,
        /// Token kind.
        kind: TokenKind,
        /// Identity derived from the encoded content.
        expected: TokenId,
    },
    /// A token is structurally unusable.
    #[error("malformed {kind} {id}: {reason}")]
    MalformedToken {
        /// Offending token.
        id: TokenId,
        /// Token kind.
        kind: TokenKind,
        /// Human-readable defect.
        reason: String,
    },
}

// ============================================================================
// SECTION: Arena
// ============================================================================

/// Identity-indexed, read-only view over one fact model.
///
/// # Invariants
/// - Every identity maps to exactly one token of one kind.
/// - Indexes are computed once in [`TokenArena::build`] and never change.
#[derive(Debug, Clone, Default)]
pub struct TokenArena {
    /// Certificates by identity.
    certificates: BTreeMap<TokenId, CertificateToken>,
    /// Revocation tokens by identity.
    revocations: BTreeMap<TokenId, RevocationToken>,
    /// Timestamps by identity.
    timestamps: BTreeMap<TokenId, TimestampToken>,
    /// Signatures by identity.
    signatures: BTreeMap<TokenId, SignatureToken>,
    /// Kind of every identity.
    kinds: BTreeMap<TokenId, TokenKind>,
    /// Certificate -> revocation tokens with an entry for it.
    revocation_index: BTreeMap<TokenId, Vec<TokenId>>,
    /// Token -> timestamps covering it.
    covering_index: BTreeMap<TokenId, Vec<TokenId>>,
}

impl TokenArena {
    /// Indexes a fact model.
    ///
    /// # Errors
    /// Returns [`FactModelError::DuplicateTokenId`] when an identity repeats
    /// and [`FactModelError::IdentityMismatch`] when an encoded token carries
    /// an identity other than its derived one.
    pub fn build(data: DiagnosticData) -> Result<Self, FactModelError> {
        let mut arena = Self::default();

        for certificate in data.certificates {
            arena.register(&certificate.id, certificate.encoded.as_deref(), TokenKind::Certificate)?;
            arena.certificates.insert(certificate.id.clone(), certificate);
        }
        for revocation in data.revocations {
            arena.register(&revocation.id, revocation.encoded.as_deref(), TokenKind::Revocation)?;
            for entry in &revocation.entries {
                arena
                    .revocation_index
                    .entry(entry.certificate.clone())
                    .or_default()
                    .push(revocation.id.clone());
            }
            arena.revocations.insert(revocation.id.clone(), revocation);
        }
        for timestamp in data.timestamps {
            arena.register(&timestamp.id, timestamp.encoded.as_deref(), TokenKind::Timestamp)?;
            for covered in &timestamp.covered {
                arena.covering_index.entry(covered.clone()).or_default().push(timestamp.id.clone());
            }
            arena.timestamps.insert(timestamp.id.clone(), timestamp);
        }
        for signature in data.signatures {
            arena.register(&signature.id, signature.encoded.as_deref(), TokenKind::Signature)?;
            arena.signatures.insert(signature.id.clone(), signature);
        }

        for ids in arena.revocation_index.values_mut() {
            ids.sort();
            ids.dedup();
        }
        for ids in arena.covering_index.values_mut() {
            ids.sort();
            ids.dedup();
        }
        Ok(arena)
    }

    /// Records the kind of a new identity.
    fn register(
        &mut self,
        id: &TokenId,
        encoded: Option<&str>,
        kind: TokenKind,
    ) -> Result<(), FactModelError> {
        if let Some(content) = encoded {
            let expected = TokenId::derive(kind, content.as_bytes());
            if &expected != id {
                return Err(FactModelError::IdentityMismatch {
                    id: id.clone(),
                    kind,
                    expected,
                });
            }
        }
        if let Some(first) = self.kinds.get(id) {
            return Err(FactModelError::DuplicateTokenId {
                id: id.clone(),
                first: *first,
                second: kind,
            });
        }
        self.kinds.insert(id.clone(), kind);
        Ok(())
    }

    /// Returns the kind of an identity.
    #[must_use]
    pub fn kind_of(&self, id: &TokenId) -> Option<TokenKind> {
        self.kinds.get(id).copied()
    }

    /// Returns a certificate by identity.
    #[must_use]
    pub fn certificate(&self, id: &TokenId) -> Option<&CertificateToken> {
        self.certificates.get(id)
    }

    /// Returns a revocation token by identity.
    #[must_use]
    pub fn revocation(&self, id: &TokenId) -> Option<&RevocationToken> {
        self.revocations.get(id)
    }

    /// Returns a timestamp by identity.
    #[must_use]
    pub fn timestamp(&self, id: &TokenId) -> Option<&TimestampToken> {
        self.timestamps.get(id)
    }

    /// Returns a signature by identity.
    #[must_use]
    pub fn signature(&self, id: &TokenId) -> Option<&SignatureToken> {
        self.signatures.get(id)
    }

    /// Iterates certificates in identity order.
    pub fn certificates(&self) -> impl Iterator<Item = &CertificateToken> {
        self.certificates.values()
    }

    /// Iterates revocation tokens in identity order.
    pub fn revocations(&self) -> impl Iterator<Item = &RevocationToken> {
        self.revocations.values()
    }

    /// Iterates timestamps in identity order.
    pub fn timestamps(&self) -> impl Iterator<Item = &TimestampToken> {
        self.timestamps.values()
    }

    /// Iterates signatures in identity order.
    pub fn signatures(&self) -> impl Iterator<Item = &SignatureToken> {
        self.signatures.values()
    }

    /// Iterates revocation entries about `certificate`, in token identity order.
    pub fn revocation_entries_for<'a>(
        &'a self,
        certificate: &TokenId,
    ) -> impl Iterator<Item = (&'a RevocationToken, &'a RevocationEntry)> + use<'a> {
        let certificate = certificate.clone();
        self.revocation_index
            .get(&certificate)
            .into_iter()
            .flatten()
            .filter_map(|id| self.revocations.get(id))
            .flat_map(move |token| {
                let certificate = certificate.clone();
                token
                    .entries
                    .iter()
                    .filter(move |entry| entry.certificate == certificate)
                    .map(move |entry| (token, entry))
            })
    }

    /// Iterates timestamps covering `id`, in identity order.
    pub fn timestamps_covering<'a>(
        &'a self,
        id: &TokenId,
    ) -> impl Iterator<Item = &'a TimestampToken> + use<'a> {
        self.covering_index
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|timestamp| self.timestamps.get(timestamp))
    }
}
