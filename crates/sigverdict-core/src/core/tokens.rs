// crates/sigverdict-core/src/core/tokens.rs
// ============================================================================
// Module: SigVerdict Token Model
// Description: Read-only views over the diagnostic fact model.
// Purpose: Provide typed, closed token variants for certificates, revocation
//          data, timestamps, and signatures.
// Dependencies: serde, time, crate::core::identifiers
// ============================================================================

//! ## Overview
//! Tokens are produced by an external extraction layer and are never mutated
//! by the engine. Every cross-token reference is a [`TokenId`] resolved
//! through the [`crate::core::arena::TokenArena`].
//!
//! Cryptographic facts (signature intact, digest matched) are established by
//! the extraction layer; the engine only judges them against the policy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::identifiers::TokenId;

// ============================================================================
// SECTION: Algorithms
// ============================================================================

/// Digest algorithms recognized by the policy tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// MD5.
    #[serde(rename = "MD5")]
    Md5,
    /// SHA-1.
    #[serde(rename = "SHA1")]
    Sha1,
    /// SHA-224.
    #[serde(rename = "SHA224")]
    Sha224,
    /// SHA-256.
    #[serde(rename = "SHA256")]
    Sha256,
    /// SHA-384.
    #[serde(rename = "SHA384")]
    Sha384,
    /// SHA-512.
    #[serde(rename = "SHA512")]
    Sha512,
    /// SHA3-256.
    #[serde(rename = "SHA3-256")]
    Sha3_256,
    /// SHA3-384.
    #[serde(rename = "SHA3-384")]
    Sha3_384,
    /// SHA3-512.
    #[serde(rename = "SHA3-512")]
    Sha3_512,
}

impl DigestAlgorithm {
    /// Every digest algorithm.
    pub const ALL: [Self; 9] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
    ];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
        }
    }

    /// Parses a canonical name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signature (encryption) algorithms recognized by the policy tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EncryptionAlgorithm {
    /// RSA.
    #[serde(rename = "RSA")]
    Rsa,
    /// DSA.
    #[serde(rename = "DSA")]
    Dsa,
    /// ECDSA.
    #[serde(rename = "ECDSA")]
    Ecdsa,
    /// Ed25519.
    #[serde(rename = "ED25519")]
    Ed25519,
    /// Ed448.
    #[serde(rename = "ED448")]
    Ed448,
}

impl EncryptionAlgorithm {
    /// Every encryption algorithm.
    pub const ALL: [Self; 5] = [Self::Rsa, Self::Dsa, Self::Ecdsa, Self::Ed25519, Self::Ed448];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Dsa => "DSA",
            Self::Ecdsa => "ECDSA",
            Self::Ed25519 => "ED25519",
            Self::Ed448 => "ED448",
        }
    }

    /// Parses a canonical name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Shared Signature Facts
// ============================================================================

/// Cryptographic facts about one signature value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicSignature {
    /// Digest algorithm, `None` when unrecognized by the extraction layer.
    #[serde(default)]
    pub digest_algorithm: Option<DigestAlgorithm>,
    /// Signature algorithm, `None` when unrecognized.
    #[serde(default)]
    pub encryption_algorithm: Option<EncryptionAlgorithm>,
    /// Key size in bits of the verifying key.
    #[serde(default)]
    pub key_size: Option<u32>,
    /// True when the signature value verified against the signer's key.
    pub intact: bool,
}

/// Digest comparison for one signed data object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestMatcher {
    /// Reference name (URI, content type, or imprint label).
    pub name: String,
    /// Digest algorithm of the reference.
    #[serde(default)]
    pub algorithm: Option<DigestAlgorithm>,
    /// True when the referenced data was located.
    pub data_found: bool,
    /// True when the recomputed digest matches.
    pub data_intact: bool,
}

/// Signed reference to the signing certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningCertificateReference {
    /// Certificate the reference resolves to.
    pub certificate: TokenId,
    /// True when the referenced digest matches the certificate.
    pub digest_match: bool,
    /// True when the referenced issuer and serial match the certificate.
    #[serde(default = "default_true")]
    pub issuer_serial_match: bool,
}

/// Signed data common to signatures and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedData {
    /// Signed reference to the signing certificate.
    #[serde(default)]
    pub signing_certificate_reference: Option<SigningCertificateReference>,
    /// Certificates that could have produced the signature.
    #[serde(default)]
    pub candidate_certificates: Vec<TokenId>,
    /// Signature value facts.
    pub basic_signature: BasicSignature,
    /// Digest comparisons for the signed data objects.
    #[serde(default)]
    pub digest_matchers: Vec<DigestMatcher>,
}

/// Serde default for flags that hold unless stated otherwise.
const fn default_true() -> bool {
    true
}

// ============================================================================
// SECTION: Certificates
// ============================================================================

/// X.509 key usage bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyUsage {
    /// digitalSignature.
    DigitalSignature,
    /// nonRepudiation (contentCommitment).
    NonRepudiation,
    /// keyEncipherment.
    KeyEncipherment,
    /// dataEncipherment.
    DataEncipherment,
    /// keyAgreement.
    KeyAgreement,
    /// keyCertSign.
    KeyCertSign,
    /// cRLSign.
    CrlSign,
    /// encipherOnly.
    EncipherOnly,
    /// decipherOnly.
    DecipherOnly,
}

impl KeyUsage {
    /// Every key usage bit.
    pub const ALL: [Self; 9] = [
        Self::DigitalSignature,
        Self::NonRepudiation,
        Self::KeyEncipherment,
        Self::DataEncipherment,
        Self::KeyAgreement,
        Self::KeyCertSign,
        Self::CrlSign,
        Self::EncipherOnly,
        Self::DecipherOnly,
    ];

    /// Returns the configuration label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DigitalSignature => "digital_signature",
            Self::NonRepudiation => "non_repudiation",
            Self::KeyEncipherment => "key_encipherment",
            Self::DataEncipherment => "data_encipherment",
            Self::KeyAgreement => "key_agreement",
            Self::KeyCertSign => "key_cert_sign",
            Self::CrlSign => "crl_sign",
            Self::EncipherOnly => "encipher_only",
            Self::DecipherOnly => "decipher_only",
        }
    }

    /// Parses a configuration label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|usage| usage.as_str() == label.trim())
    }
}

/// Certificate token.
///
/// # Invariants
/// - `not_before <= not_after` is expected but not enforced; an inverted
///   window simply never contains any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateToken {
    /// Token identity.
    pub id: TokenId,
    /// Encoded token content as delivered by the extraction layer. When
    /// present, `id` must equal [`TokenId::derive`] over these bytes.
    #[serde(default)]
    pub encoded: Option<String>,
    /// Subject distinguished name.
    pub subject: String,
    /// Issuer distinguished name.
    pub issuer: String,
    /// Serial number (hex).
    pub serial_number: String,
    /// Subject key identifier (hex).
    #[serde(default)]
    pub subject_key_id: Option<String>,
    /// Authority key identifier (hex).
    #[serde(default)]
    pub authority_key_id: Option<String>,
    /// Start of the validity period.
    #[serde(with = "time::serde::rfc3339")]
    pub not_before: OffsetDateTime,
    /// End of the validity period.
    #[serde(with = "time::serde::rfc3339")]
    pub not_after: OffsetDateTime,
    /// Key usage bits.
    #[serde(default)]
    pub key_usages: BTreeSet<KeyUsage>,
    /// Basic constraints CA flag.
    #[serde(default)]
    pub ca: bool,
    /// The issuer's signature over this certificate.
    pub signature: BasicSignature,
    /// True when subject equals issuer and the certificate verifies itself.
    #[serde(default)]
    pub self_signed: bool,
    /// True when a trusted list declares this certificate a trust anchor.
    #[serde(default)]
    pub trusted: bool,
    /// Time after which the trust anchor is no longer accepted.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub trust_sunset_date: Option<OffsetDateTime>,
    /// CRL distribution points.
    #[serde(default)]
    pub crl_urls: Vec<String>,
    /// OCSP responder locations.
    #[serde(default)]
    pub ocsp_urls: Vec<String>,
    /// id-pkix-ocsp-nocheck extension present.
    #[serde(default)]
    pub ocsp_no_check: bool,
}

impl CertificateToken {
    /// Returns true when `at` falls within the validity period.
    #[must_use]
    pub fn is_valid_at(&self, at: OffsetDateTime) -> bool {
        self.not_before <= at && at <= self.not_after
    }

    /// Returns true when the certificate points at CRL or OCSP sources.
    #[must_use]
    pub fn has_revocation_pointers(&self) -> bool {
        !self.crl_urls.is_empty() || !self.ocsp_urls.is_empty()
    }

    /// Returns true when the certificate is a trust anchor at `at`.
    #[must_use]
    pub fn is_trust_anchor_at(&self, at: OffsetDateTime) -> bool {
        self.trusted && self.trust_sunset_date.is_none_or(|sunset| at <= sunset)
    }

    /// Returns true when chain building stops at this certificate.
    #[must_use]
    pub const fn is_chain_top(&self) -> bool {
        self.trusted || self.self_signed
    }
}

// ============================================================================
// SECTION: Revocation Data
// ============================================================================

/// Revocation data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationKind {
    /// Certificate revocation list.
    Crl,
    /// OCSP response.
    Ocsp,
}

/// Status a revocation entry asserts for one certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    /// Not revoked as of `this_update`.
    Good,
    /// Revoked.
    Revoked,
    /// The responder does not know the certificate.
    Unknown,
}

/// RFC 5280 revocation reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationReason {
    /// unspecified.
    Unspecified,
    /// keyCompromise.
    KeyCompromise,
    /// cACompromise.
    CaCompromise,
    /// affiliationChanged.
    AffiliationChanged,
    /// superseded.
    Superseded,
    /// cessationOfOperation.
    CessationOfOperation,
    /// certificateHold.
    CertificateHold,
    /// removeFromCRL.
    RemoveFromCrl,
    /// privilegeWithdrawn.
    PrivilegeWithdrawn,
    /// aACompromise.
    AaCompromise,
}

/// Status of one certificate within a revocation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// Certificate the entry speaks about.
    pub certificate: TokenId,
    /// Asserted status.
    pub status: CertificateStatus,
    /// Revocation reason, when revoked.
    #[serde(default)]
    pub reason: Option<RevocationReason>,
    /// Revocation time, when revoked.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub revocation_date: Option<OffsetDateTime>,
}

/// CRL or OCSP token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationToken {
    /// Token identity.
    pub id: TokenId,
    /// Encoded token content as delivered by the extraction layer. When
    /// present, `id` must equal [`TokenId::derive`] over these bytes.
    #[serde(default)]
    pub encoded: Option<String>,
    /// Source kind.
    pub kind: RevocationKind,
    /// Certificate that signed the revocation data.
    #[serde(default)]
    pub issuer_certificate: Option<TokenId>,
    /// Issuance time.
    #[serde(with = "time::serde::rfc3339")]
    pub this_update: OffsetDateTime,
    /// Announced next issuance.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub next_update: Option<OffsetDateTime>,
    /// Per-certificate statuses.
    #[serde(default)]
    pub entries: Vec<RevocationEntry>,
    /// Signature value facts.
    pub signature: BasicSignature,
}

// ============================================================================
// SECTION: Timestamps
// ============================================================================

/// Role of a timestamp relative to the signature it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampKind {
    /// Timestamp over the signed content, produced before signing.
    Content,
    /// Timestamp over the signature value.
    Signature,
    /// Timestamp over the signature and its validation material.
    Archive,
}

/// RFC 3161 timestamp token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampToken {
    /// Token identity.
    pub id: TokenId,
    /// Encoded token content as delivered by the extraction layer. When
    /// present, `id` must equal [`TokenId::derive`] over these bytes.
    #[serde(default)]
    pub encoded: Option<String>,
    /// Role of the timestamp.
    pub kind: TimestampKind,
    /// Time asserted by the timestamping authority.
    #[serde(with = "time::serde::rfc3339")]
    pub production_time: OffsetDateTime,
    /// Tokens whose existence the timestamp attests.
    #[serde(default)]
    pub covered: BTreeSet<TokenId>,
    /// Message imprint comparison.
    pub message_imprint: DigestMatcher,
    /// Signed data of the timestamp itself.
    pub signed_data: SignedData,
}

// ============================================================================
// SECTION: Signatures
// ============================================================================

/// Signature policy declared by a signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePolicyDeclaration {
    /// Explicit policy identifier (OID or URI).
    #[serde(default)]
    pub identifier: Option<String>,
    /// True for an implicit policy.
    #[serde(default)]
    pub implicit: bool,
    /// True when the policy document could be retrieved and parsed.
    #[serde(default)]
    pub document_available: bool,
    /// Result of the policy document digest comparison, when computed.
    #[serde(default)]
    pub digest_match: Option<bool>,
}

/// Signature token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureToken {
    /// Token identity.
    pub id: TokenId,
    /// Encoded token content as delivered by the extraction layer. When
    /// present, `id` must equal [`TokenId::derive`] over these bytes.
    #[serde(default)]
    pub encoded: Option<String>,
    /// Signing time claimed in the signed attributes.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub claimed_signing_time: Option<OffsetDateTime>,
    /// Signed data.
    pub signed_data: SignedData,
    /// Declared signature policy.
    #[serde(default)]
    pub policy: Option<SignaturePolicyDeclaration>,
    /// Signature format label (for example `PAdES-BASELINE-B`).
    #[serde(default)]
    pub format: Option<String>,
    /// True when the container passed structural validation.
    #[serde(default = "default_true")]
    pub structurally_valid: bool,
}
