// crates/sigverdict-core/src/core/identifiers.rs
// ============================================================================
// Module: SigVerdict Identifiers
// Description: Token identities and token kinds.
// Purpose: Provide stable, serializable identities derived from token content.
// Dependencies: serde, crate::core::hashing
// ============================================================================

//! ## Overview
//! Every token in the fact model carries a [`TokenId`]. Identities are opaque
//! strings on the wire. [`TokenId::derive`] builds the canonical form from a
//! SHA-256 digest of the token's encoded content, prefixed by its kind.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::sha256_hex;

// ============================================================================
// SECTION: Token Kind
// ============================================================================

/// Closed set of token variants in the fact model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// X.509 certificate.
    Certificate,
    /// CRL or OCSP response.
    Revocation,
    /// RFC 3161 timestamp.
    Timestamp,
    /// Signature.
    Signature,
}

impl TokenKind {
    /// Returns the identity prefix for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Certificate => "C",
            Self::Revocation => "R",
            Self::Timestamp => "T",
            Self::Signature => "S",
        }
    }

    /// Returns the label used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Certificate => "certificate",
            Self::Revocation => "revocation",
            Self::Timestamp => "timestamp",
            Self::Signature => "signature",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Token Identity
// ============================================================================

/// Stable token identity.
///
/// # Invariants
/// - Opaque; equality is byte equality of the wire string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Creates a token identity from an existing wire string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives the canonical identity of a token from its encoded content.
    #[must_use]
    pub fn derive(kind: TokenKind, content: &[u8]) -> Self {
        Self(format!("{}-{}", kind.prefix(), sha256_hex(content).to_ascii_uppercase()))
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TokenId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
