// crates/sigverdict-core/src/core/constraints.rs
// ============================================================================
// Module: SigVerdict Constraints
// Description: Check names, per-check constraints, and the validation policy.
// Purpose: Provide the immutable declarative policy consulted by every check.
// Dependencies: time, verdict-chain, crate::core::tokens
// ============================================================================

//! ## Overview
//! [`CheckKey`] is the closed set of configurable checks. A
//! [`ValidationPolicy`] maps keys to [`Constraint`]s; keys absent from the
//! map fall back to their built-in defaults. Cryptographic strength is
//! expressed as `(algorithm, minimum key size) -> expiration` rows.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;
use verdict_chain::Level;

use crate::core::tokens::DigestAlgorithm;
use crate::core::tokens::EncryptionAlgorithm;
use crate::core::tokens::KeyUsage;

// ============================================================================
// SECTION: Check Keys
// ============================================================================

/// Configurable checks, grouped by the block that runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKey {
    // ISC
    /// The signing certificate resolves to exactly one certificate.
    SigningCertificateIdentified,
    /// A signed signing-certificate reference is present.
    SigningCertificateReferencePresent,
    /// The reference digest matches the signing certificate.
    SigningCertificateDigestMatch,
    /// The reference issuer/serial matches the signing certificate.
    SigningCertificateIssuerSerialMatch,
    // VCI
    /// The declared signature policy is available.
    SignaturePolicyAvailable,
    /// The declared signature policy is accepted.
    SignaturePolicyAccepted,
    /// The signature policy document digest matches.
    SignaturePolicyHashValid,
    // XCV
    /// A chain to a trust anchor could be built.
    ProspectiveCertificateChain,
    /// The trust anchor is still accepted at the target time.
    TrustAnchorValid,
    /// The certificate signature is intact.
    CertificateSignatureIntact,
    /// The target time falls in the validity period.
    CertificateValidityRange,
    /// The signing certificate has an expected key usage.
    SigningCertificateKeyUsage,
    /// The CA certificate may sign certificates.
    CaCertificateBasicConstraints,
    /// The certificate points at revocation sources.
    RevocationInfoAccessPresent,
    /// Acceptable revocation data exists.
    RevocationDataAvailable,
    /// The certificate is not revoked at the target time.
    CertificateNotRevoked,
    /// The certificate is not on hold at the target time.
    CertificateNotOnHold,
    /// The revocation data is fresh for the target time.
    RevocationFresh,
    /// The certificate signature algorithms are acceptable.
    CertificateCryptographic,
    // CV
    /// All signed data objects were found.
    ReferenceDataFound,
    /// All signed data object digests match.
    ReferenceDataIntact,
    /// The signature value is intact.
    SignatureIntact,
    // SAV
    /// The container passed structural validation.
    StructuralValidation,
    /// The signature format is accepted.
    SignatureFormatAccepted,
    /// A signing time is claimed.
    SigningTimePresent,
    /// The signature algorithms are acceptable.
    SignatureCryptographic,
    /// The reference digest algorithms are acceptable.
    ReferenceDigestCryptographic,
    // Processes
    /// No validated content timestamp postdates the signing certificate revocation.
    ContentTimestampBeforeRevocation,
    /// No validated content timestamp postdates the signing certificate expiry.
    ContentTimestampBeforeExpiration,
    /// The basic validation result is passed or resolvable with earlier proofs.
    BasicValidationConclusive,
    /// A timestamp of the signature validated.
    TimestampValid,
    /// Content, signature, and archive timestamps are ordered.
    TimestampOrderCoherent,
    /// The best signature time is not before the signing certificate issuance.
    BestSignatureTimeNotBeforeIssuance,
    /// A proof of existence within the control time validated.
    PastSignatureValidation,
}

impl CheckKey {
    /// Every key, in block order.
    pub const ALL: [Self; 34] = [
        Self::SigningCertificateIdentified,
        Self::SigningCertificateReferencePresent,
        Self::SigningCertificateDigestMatch,
        Self::SigningCertificateIssuerSerialMatch,
        Self::SignaturePolicyAvailable,
        Self::SignaturePolicyAccepted,
        Self::SignaturePolicyHashValid,
        Self::ProspectiveCertificateChain,
        Self::TrustAnchorValid,
        Self::CertificateSignatureIntact,
        Self::CertificateValidityRange,
        Self::SigningCertificateKeyUsage,
        Self::CaCertificateBasicConstraints,
        Self::RevocationInfoAccessPresent,
        Self::RevocationDataAvailable,
        Self::CertificateNotRevoked,
        Self::CertificateNotOnHold,
        Self::RevocationFresh,
        Self::CertificateCryptographic,
        Self::ReferenceDataFound,
        Self::ReferenceDataIntact,
        Self::SignatureIntact,
        Self::StructuralValidation,
        Self::SignatureFormatAccepted,
        Self::SigningTimePresent,
        Self::SignatureCryptographic,
        Self::ReferenceDigestCryptographic,
        Self::ContentTimestampBeforeRevocation,
        Self::ContentTimestampBeforeExpiration,
        Self::BasicValidationConclusive,
        Self::TimestampValid,
        Self::TimestampOrderCoherent,
        Self::BestSignatureTimeNotBeforeIssuance,
        Self::PastSignatureValidation,
    ];

    /// Returns the configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SigningCertificateIdentified => "signing_certificate_identified",
            Self::SigningCertificateReferencePresent => "signing_certificate_reference_present",
            Self::SigningCertificateDigestMatch => "signing_certificate_digest_match",
            Self::SigningCertificateIssuerSerialMatch => "signing_certificate_issuer_serial_match",
            Self::SignaturePolicyAvailable => "signature_policy_available",
            Self::SignaturePolicyAccepted => "signature_policy_accepted",
            Self::SignaturePolicyHashValid => "signature_policy_hash_valid",
            Self::ProspectiveCertificateChain => "prospective_certificate_chain",
            Self::TrustAnchorValid => "trust_anchor_valid",
            Self::CertificateSignatureIntact => "certificate_signature_intact",
            Self::CertificateValidityRange => "certificate_validity_range",
            Self::SigningCertificateKeyUsage => "signing_certificate_key_usage",
            Self::CaCertificateBasicConstraints => "ca_certificate_basic_constraints",
            Self::RevocationInfoAccessPresent => "revocation_info_access_present",
            Self::RevocationDataAvailable => "revocation_data_available",
            Self::CertificateNotRevoked => "certificate_not_revoked",
            Self::CertificateNotOnHold => "certificate_not_on_hold",
            Self::RevocationFresh => "revocation_fresh",
            Self::CertificateCryptographic => "certificate_cryptographic",
            Self::ReferenceDataFound => "reference_data_found",
            Self::ReferenceDataIntact => "reference_data_intact",
            Self::SignatureIntact => "signature_intact",
            Self::StructuralValidation => "structural_validation",
            Self::SignatureFormatAccepted => "signature_format_accepted",
            Self::SigningTimePresent => "signing_time_present",
            Self::SignatureCryptographic => "signature_cryptographic",
            Self::ReferenceDigestCryptographic => "reference_digest_cryptographic",
            Self::ContentTimestampBeforeRevocation => "content_timestamp_before_revocation",
            Self::ContentTimestampBeforeExpiration => "content_timestamp_before_expiration",
            Self::BasicValidationConclusive => "basic_validation_conclusive",
            Self::TimestampValid => "timestamp_valid",
            Self::TimestampOrderCoherent => "timestamp_order_coherent",
            Self::BestSignatureTimeNotBeforeIssuance => "best_signature_time_not_before_issuance",
            Self::PastSignatureValidation => "past_signature_validation",
        }
    }

    /// Parses a configuration name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name.trim())
    }

    /// Returns the built-in severity.
    #[must_use]
    pub const fn default_level(self) -> Level {
        match self {
            Self::SigningCertificateReferencePresent
            | Self::SigningCertificateIssuerSerialMatch
            | Self::RevocationInfoAccessPresent
            | Self::StructuralValidation
            | Self::SigningTimePresent
            | Self::TimestampValid
            | Self::TimestampOrderCoherent => Level::Warn,
            Self::SignatureFormatAccepted => Level::Ignore,
            _ => Level::Fail,
        }
    }

    /// Returns true when the key accepts an expected-value set.
    #[must_use]
    pub const fn takes_expected_values(self) -> bool {
        matches!(
            self,
            Self::SigningCertificateKeyUsage
                | Self::SignaturePolicyAccepted
                | Self::SignatureFormatAccepted
        )
    }

    /// Returns the built-in expected values, if any.
    #[must_use]
    pub fn default_expected(self) -> Option<BTreeSet<String>> {
        let values: &[&str] = match self {
            Self::SigningCertificateKeyUsage => {
                &[KeyUsage::DigitalSignature.as_str(), KeyUsage::NonRepudiation.as_str()]
            }
            Self::SignaturePolicyAccepted => &[ANY_POLICY, NO_POLICY],
            _ => return None,
        };
        Some(values.iter().map(|value| (*value).to_string()).collect())
    }
}

impl fmt::Display for CheckKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Signature Policy Identifiers
// ============================================================================

/// Accepts any explicit signature policy.
pub const ANY_POLICY: &str = "ANY_POLICY";
/// Accepts signatures without a policy.
pub const NO_POLICY: &str = "NO_POLICY";
/// Accepts implicit policies.
pub const IMPLICIT_POLICY: &str = "IMPLICIT_POLICY";

// ============================================================================
// SECTION: Constraints
// ============================================================================

/// Severity plus optional expected values for one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Severity applied on failure.
    pub level: Level,
    /// Accepted values, for checks that compare against a set.
    pub expected: Option<BTreeSet<String>>,
}

impl Constraint {
    /// Constraint with a level and no expected values.
    #[must_use]
    pub const fn level(level: Level) -> Self {
        Self {
            level,
            expected: None,
        }
    }
}

/// Certificate chain evaluation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationModel {
    /// Every certificate is evaluated at the target time.
    #[default]
    Shell,
    /// CA certificates are evaluated at their subordinate's issuance time.
    Chain,
}

impl ValidationModel {
    /// Parses a configuration label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "shell" => Some(Self::Shell),
            "chain" => Some(Self::Chain),
            _ => None,
        }
    }

    /// Returns the configuration label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shell => "shell",
            Self::Chain => "chain",
        }
    }
}

// ============================================================================
// SECTION: Cryptographic Rules
// ============================================================================

/// Expiration row for a digest algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestRule {
    /// Algorithm.
    pub algorithm: DigestAlgorithm,
    /// Time from which the algorithm is no longer acceptable.
    pub expires: Option<OffsetDateTime>,
}

/// Expiration row for a signature algorithm and minimum key size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionRule {
    /// Algorithm.
    pub algorithm: EncryptionAlgorithm,
    /// Smallest key size (bits) the row applies to.
    pub min_key_size: u32,
    /// Time from which keys of this size are no longer acceptable.
    pub expires: Option<OffsetDateTime>,
}

/// Cryptographic strength tables.
///
/// # Invariants
/// - Algorithms absent from the tables are never acceptable.
/// - For a key, the row with the largest `min_key_size` not above the key
///   size applies; keys below every row are never acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptographicRules {
    /// Digest algorithm rows.
    pub digest: Vec<DigestRule>,
    /// Signature algorithm rows.
    pub encryption: Vec<EncryptionRule>,
}

impl Default for CryptographicRules {
    fn default() -> Self {
        let digest = |algorithm, expires| DigestRule {
            algorithm,
            expires,
        };
        let encryption = |algorithm, min_key_size, expires| EncryptionRule {
            algorithm,
            min_key_size,
            expires,
        };
        Self {
            digest: vec![
                digest(DigestAlgorithm::Md5, Some(datetime!(2005-01-01 0:00 UTC))),
                digest(DigestAlgorithm::Sha1, Some(datetime!(2012-08-01 0:00 UTC))),
                digest(DigestAlgorithm::Sha224, Some(datetime!(2029-01-01 0:00 UTC))),
                digest(DigestAlgorithm::Sha256, None),
                digest(DigestAlgorithm::Sha384, None),
                digest(DigestAlgorithm::Sha512, None),
                digest(DigestAlgorithm::Sha3_256, None),
                digest(DigestAlgorithm::Sha3_384, None),
                digest(DigestAlgorithm::Sha3_512, None),
            ],
            encryption: vec![
                encryption(EncryptionAlgorithm::Rsa, 1024, Some(datetime!(2013-01-01 0:00 UTC))),
                encryption(EncryptionAlgorithm::Rsa, 1536, Some(datetime!(2017-01-01 0:00 UTC))),
                encryption(EncryptionAlgorithm::Rsa, 2048, Some(datetime!(2031-01-01 0:00 UTC))),
                encryption(EncryptionAlgorithm::Rsa, 3072, None),
                encryption(EncryptionAlgorithm::Dsa, 2048, Some(datetime!(2029-01-01 0:00 UTC))),
                encryption(EncryptionAlgorithm::Ecdsa, 256, None),
                encryption(EncryptionAlgorithm::Ed25519, 256, None),
                encryption(EncryptionAlgorithm::Ed448, 448, None),
            ],
        }
    }
}

// ============================================================================
// SECTION: Revocation and Signature Policy Rules
// ============================================================================

/// Revocation handling rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationRules {
    /// Maximum age of revocation data relative to the target time; defaults
    /// to the data's own `next_update - this_update` window.
    pub max_freshness: Option<Duration>,
    /// Skip revocation checks for certificates carrying OCSP no-check.
    pub skip_ocsp_no_check: bool,
}

impl Default for RevocationRules {
    fn default() -> Self {
        Self {
            max_freshness: None,
            skip_ocsp_no_check: true,
        }
    }
}

/// Signature policy requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignaturePolicyRules {
    /// Signatures must declare a policy.
    pub required: bool,
}

// ============================================================================
// SECTION: Validation Policy
// ============================================================================

/// Immutable validation policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Policy name echoed in reports.
    pub name: String,
    /// Chain evaluation model.
    pub model: ValidationModel,
    /// Per-check overrides; absent keys use built-in defaults.
    pub constraints: BTreeMap<CheckKey, Constraint>,
    /// Cryptographic strength tables.
    pub cryptographic: CryptographicRules,
    /// Revocation handling.
    pub revocation: RevocationRules,
    /// Signature policy requirements.
    pub signature_policy: SignaturePolicyRules,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            name: DEFAULT_POLICY_NAME.to_string(),
            model: ValidationModel::Shell,
            constraints: BTreeMap::new(),
            cryptographic: CryptographicRules::default(),
            revocation: RevocationRules::default(),
            signature_policy: SignaturePolicyRules::default(),
        }
    }
}

/// Name of the built-in policy.
pub const DEFAULT_POLICY_NAME: &str = "sigverdict-default";

impl ValidationPolicy {
    /// Returns the severity for a check.
    #[must_use]
    pub fn level(&self, key: CheckKey) -> Level {
        self.constraints.get(&key).map_or_else(|| key.default_level(), |constraint| constraint.level)
    }

    /// Returns the expected values for a check, falling back to defaults.
    #[must_use]
    pub fn expected(&self, key: CheckKey) -> Option<BTreeSet<String>> {
        self.constraints
            .get(&key)
            .and_then(|constraint| constraint.expected.clone())
            .or_else(|| key.default_expected())
    }

    /// Returns a copy with one check's severity replaced.
    #[must_use]
    pub fn with_level(mut self, key: CheckKey, level: Level) -> Self {
        let expected = self.constraints.get(&key).and_then(|constraint| constraint.expected.clone());
        self.constraints.insert(
            key,
            Constraint {
                level,
                expected,
            },
        );
        self
    }
}
