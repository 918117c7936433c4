// crates/verdict-chain/src/indication.rs
// ============================================================================
// Module: Verdict Taxonomy
// Description: Indications, sub-indications, and the fixed mapping between them.
// Purpose: Make inconsistent verdict pairs unrepresentable on every internal path.
// Dependencies: serde, crate::error
// ============================================================================

//! ## Overview
//! The taxonomy is two-level. An [`Indication`] states the outcome and a
//! [`SubIndication`] refines non-passing outcomes. [`SubIndication::allowed_under`]
//! is the single mapping table; every [`Verdict`] satisfies it.
//!
//! The infallible constructors [`Verdict::failed`] and [`Verdict::indeterminate`]
//! honour the requested indication when the table allows it and otherwise
//! fall back to the sub-indication's owning indication, so engine code can
//! never build a pair the table rejects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::error::VerdictError;

// ============================================================================
// SECTION: Indication
// ============================================================================

/// Top-level validation outcome.
///
/// `PASSED`, `FAILED`, and `INDETERMINATE` are produced by building blocks
/// and processes. `TOTAL_PASSED` and `TOTAL_FAILED` are their report-level
/// images for a whole signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Indication {
    /// All checks passed.
    Passed,
    /// A check proved the object invalid.
    Failed,
    /// The available facts do not allow a conclusion.
    Indeterminate,
    /// Report-level image of [`Indication::Passed`].
    TotalPassed,
    /// Report-level image of [`Indication::Failed`].
    TotalFailed,
}

impl Indication {
    /// Every indication, in declaration order.
    pub const ALL: [Self; 5] =
        [Self::Passed, Self::Failed, Self::Indeterminate, Self::TotalPassed, Self::TotalFailed];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Indeterminate => "INDETERMINATE",
            Self::TotalPassed => "TOTAL_PASSED",
            Self::TotalFailed => "TOTAL_FAILED",
        }
    }

    /// Returns true when the indication is a passing outcome.
    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed | Self::TotalPassed)
    }

    /// Returns true when a sub-indication must accompany this indication.
    #[must_use]
    pub const fn requires_sub_indication(self) -> bool {
        matches!(self, Self::Failed | Self::Indeterminate | Self::TotalFailed)
    }

    /// Maps a process-level indication to its report-level image.
    #[must_use]
    pub const fn to_total(self) -> Self {
        match self {
            Self::Passed | Self::TotalPassed => Self::TotalPassed,
            Self::Failed | Self::TotalFailed => Self::TotalFailed,
            Self::Indeterminate => Self::Indeterminate,
        }
    }
}

impl fmt::Display for Indication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Sub-Indication
// ============================================================================

/// Closed set of refinement codes for non-passing indications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubIndication {
    /// The object does not conform to its format.
    FormatFailure,
    /// A signed data object digest does not match.
    HashFailure,
    /// The signature value could not be verified with the signer's key.
    SigCryptoFailure,
    /// The signing certificate was revoked before the signature was created.
    Revoked,
    /// The signing certificate expired before the signature was created.
    Expired,
    /// The signing certificate was not yet valid at signing time.
    NotYetValid,
    /// Signature attributes do not satisfy the constraints.
    SigConstraintsFailure,
    /// Certificate chain does not satisfy the chain constraints.
    ChainConstraintsFailure,
    /// Certificate chain validation failed for an unspecified reason.
    CertificateChainGeneralFailure,
    /// An algorithm or key size is not acceptable.
    CryptoConstraintsFailure,
    /// The signature policy could not be processed.
    PolicyProcessingError,
    /// The signature policy document is not available.
    SignaturePolicyNotAvailable,
    /// Timestamps are not in a coherent order.
    TimestampOrderFailure,
    /// The signing certificate could not be identified.
    NoSigningCertificateFound,
    /// No chain to a trust anchor could be built.
    NoCertificateChainFound,
    /// The signing certificate is revoked and no POE predates the revocation.
    RevokedNoPoe,
    /// A CA certificate is revoked and no POE predates the revocation.
    RevokedCaNoPoe,
    /// The signing certificate is expired and no POE predates the expiry.
    OutOfBoundsNoPoe,
    /// The signing certificate is expired but not revoked.
    OutOfBoundsNotRevoked,
    /// Revocation data falls outside the certificate validity without POE.
    RevocationOutOfBoundsNoPoe,
    /// An algorithm expired and no POE predates its expiry.
    CryptoConstraintsFailureNoPoe,
    /// No proof of existence is available.
    NoPoe,
    /// Fresher revocation data may allow a conclusion later.
    TryLater,
    /// Signed data could not be found.
    SignedDataNotFound,
    /// No chain could be built and no POE predates the failure.
    NoCertificateChainFoundNoPoe,
    /// Unspecified failure.
    Generic,
}

impl SubIndication {
    /// Every sub-indication, in declaration order.
    pub const ALL: [Self; 26] = [
        Self::FormatFailure,
        Self::HashFailure,
        Self::SigCryptoFailure,
        Self::Revoked,
        Self::Expired,
        Self::NotYetValid,
        Self::SigConstraintsFailure,
        Self::ChainConstraintsFailure,
        Self::CertificateChainGeneralFailure,
        Self::CryptoConstraintsFailure,
        Self::PolicyProcessingError,
        Self::SignaturePolicyNotAvailable,
        Self::TimestampOrderFailure,
        Self::NoSigningCertificateFound,
        Self::NoCertificateChainFound,
        Self::RevokedNoPoe,
        Self::RevokedCaNoPoe,
        Self::OutOfBoundsNoPoe,
        Self::OutOfBoundsNotRevoked,
        Self::RevocationOutOfBoundsNoPoe,
        Self::CryptoConstraintsFailureNoPoe,
        Self::NoPoe,
        Self::TryLater,
        Self::SignedDataNotFound,
        Self::NoCertificateChainFoundNoPoe,
        Self::Generic,
    ];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FormatFailure => "FORMAT_FAILURE",
            Self::HashFailure => "HASH_FAILURE",
            Self::SigCryptoFailure => "SIG_CRYPTO_FAILURE",
            Self::Revoked => "REVOKED",
            Self::Expired => "EXPIRED",
            Self::NotYetValid => "NOT_YET_VALID",
            Self::SigConstraintsFailure => "SIG_CONSTRAINTS_FAILURE",
            Self::ChainConstraintsFailure => "CHAIN_CONSTRAINTS_FAILURE",
            Self::CertificateChainGeneralFailure => "CERTIFICATE_CHAIN_GENERAL_FAILURE",
            Self::CryptoConstraintsFailure => "CRYPTO_CONSTRAINTS_FAILURE",
            Self::PolicyProcessingError => "POLICY_PROCESSING_ERROR",
            Self::SignaturePolicyNotAvailable => "SIGNATURE_POLICY_NOT_AVAILABLE",
            Self::TimestampOrderFailure => "TIMESTAMP_ORDER_FAILURE",
            Self::NoSigningCertificateFound => "NO_SIGNING_CERTIFICATE_FOUND",
            Self::NoCertificateChainFound => "NO_CERTIFICATE_CHAIN_FOUND",
            Self::RevokedNoPoe => "REVOKED_NO_POE",
            Self::RevokedCaNoPoe => "REVOKED_CA_NO_POE",
            Self::OutOfBoundsNoPoe => "OUT_OF_BOUNDS_NO_POE",
            Self::OutOfBoundsNotRevoked => "OUT_OF_BOUNDS_NOT_REVOKED",
            Self::RevocationOutOfBoundsNoPoe => "REVOCATION_OUT_OF_BOUNDS_NO_POE",
            Self::CryptoConstraintsFailureNoPoe => "CRYPTO_CONSTRAINTS_FAILURE_NO_POE",
            Self::NoPoe => "NO_POE",
            Self::TryLater => "TRY_LATER",
            Self::SignedDataNotFound => "SIGNED_DATA_NOT_FOUND",
            Self::NoCertificateChainFoundNoPoe => "NO_CERTIFICATE_CHAIN_FOUND_NO_POE",
            Self::Generic => "GENERIC",
        }
    }

    /// Mapping table: returns true when this code may refine `indication`.
    ///
    /// `TOTAL_FAILED` shares the `FAILED` column.
    #[must_use]
    pub const fn allowed_under(self, indication: Indication) -> bool {
        match indication {
            Indication::Passed | Indication::TotalPassed => false,
            Indication::Failed | Indication::TotalFailed => matches!(
                self,
                Self::FormatFailure
                    | Self::HashFailure
                    | Self::SigCryptoFailure
                    | Self::Revoked
                    | Self::Expired
                    | Self::NotYetValid
            ),
            Indication::Indeterminate => {
                !matches!(self, Self::HashFailure | Self::SigCryptoFailure | Self::Revoked)
            }
        }
    }

    /// Returns the indication this code belongs to when used on its own.
    #[must_use]
    pub const fn owning_indication(self) -> Indication {
        match self {
            Self::HashFailure | Self::SigCryptoFailure | Self::Revoked => Indication::Failed,
            _ => Indication::Indeterminate,
        }
    }

    /// Returns true when evaluating at an earlier provable time may change
    /// the outcome.
    #[must_use]
    pub const fn is_time_sensitive(self) -> bool {
        matches!(
            self,
            Self::Expired
                | Self::RevokedNoPoe
                | Self::RevokedCaNoPoe
                | Self::OutOfBoundsNoPoe
                | Self::OutOfBoundsNotRevoked
                | Self::RevocationOutOfBoundsNoPoe
                | Self::CryptoConstraintsFailureNoPoe
                | Self::NoCertificateChainFoundNoPoe
                | Self::TryLater
        )
    }
}

impl fmt::Display for SubIndication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// A consistent indication/sub-indication pair.
///
/// # Invariants
/// - `sub_indication` is present iff [`Indication::requires_sub_indication`].
/// - When present, `sub_indication` satisfies [`SubIndication::allowed_under`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "VerdictRecord", into = "VerdictRecord")]
pub struct Verdict {
    /// Outcome.
    indication: Indication,
    /// Refinement, present for non-passing outcomes.
    sub_indication: Option<SubIndication>,
}

impl Verdict {
    /// Builds a verdict from an explicit pair, enforcing the mapping table.
    ///
    /// # Errors
    /// Returns [`VerdictError`] when the pair is inconsistent.
    pub const fn new(
        indication: Indication,
        sub_indication: Option<SubIndication>,
    ) -> Result<Self, VerdictError> {
        match (indication.requires_sub_indication(), sub_indication) {
            (true, None) => Err(VerdictError::MissingSubIndication {
                indication,
            }),
            (false, Some(sub_indication)) => Err(VerdictError::UnexpectedSubIndication {
                indication,
                sub_indication,
            }),
            (true, Some(sub)) if !sub.allowed_under(indication) => {
                Err(VerdictError::InconsistentSubIndication {
                    indication,
                    sub_indication: sub,
                })
            }
            _ => Ok(Self {
                indication,
                sub_indication,
            }),
        }
    }

    /// Returns the passing verdict.
    #[must_use]
    pub const fn passed() -> Self {
        Self {
            indication: Indication::Passed,
            sub_indication: None,
        }
    }

    /// Returns a `FAILED` verdict, or the owning indication of `sub` when the
    /// table does not allow it under `FAILED`.
    #[must_use]
    pub const fn failed(sub: SubIndication) -> Self {
        Self::with_preferred(Indication::Failed, sub)
    }

    /// Returns an `INDETERMINATE` verdict, or the owning indication of `sub`
    /// when the table does not allow it under `INDETERMINATE`.
    #[must_use]
    pub const fn indeterminate(sub: SubIndication) -> Self {
        Self::with_preferred(Indication::Indeterminate, sub)
    }

    /// Builds a non-passing verdict honouring `preferred` when allowed.
    const fn with_preferred(preferred: Indication, sub: SubIndication) -> Self {
        let indication =
            if sub.allowed_under(preferred) { preferred } else { sub.owning_indication() };
        Self {
            indication,
            sub_indication: Some(sub),
        }
    }

    /// Returns the indication.
    #[must_use]
    pub const fn indication(&self) -> Indication {
        self.indication
    }

    /// Returns the sub-indication, if any.
    #[must_use]
    pub const fn sub_indication(&self) -> Option<SubIndication> {
        self.sub_indication
    }

    /// Returns true when the indication is passing.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        self.indication.is_passed()
    }

    /// Returns true for `INDETERMINATE` verdicts whose sub-indication may be
    /// resolved by evaluating at an earlier provable time.
    #[must_use]
    pub const fn is_time_sensitive(&self) -> bool {
        match (self.indication, self.sub_indication) {
            (Indication::Indeterminate, Some(sub)) => sub.is_time_sensitive(),
            _ => false,
        }
    }

    /// Returns true when the verdict carries `sub`.
    #[must_use]
    pub fn has_sub_indication(&self, sub: SubIndication) -> bool {
        self.sub_indication == Some(sub)
    }

    /// Maps the verdict to its report-level image.
    #[must_use]
    pub const fn to_total(self) -> Self {
        Self {
            indication: self.indication.to_total(),
            sub_indication: self.sub_indication,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_indication {
            Some(sub) => write!(f, "{}/{}", self.indication, sub),
            None => self.indication.fmt(f),
        }
    }
}

/// Serialized form of a [`Verdict`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct VerdictRecord {
    /// Outcome.
    indication: Indication,
    /// Refinement code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_indication: Option<SubIndication>,
}

impl TryFrom<VerdictRecord> for Verdict {
    type Error = VerdictError;

    fn try_from(record: VerdictRecord) -> Result<Self, Self::Error> {
        Self::new(record.indication, record.sub_indication)
    }
}

impl From<Verdict> for VerdictRecord {
    fn from(verdict: Verdict) -> Self {
        Self {
            indication: verdict.indication,
            sub_indication: verdict.sub_indication,
        }
    }
}
