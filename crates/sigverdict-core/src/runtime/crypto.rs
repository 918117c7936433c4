// crates/sigverdict-core/src/runtime/crypto.rs
// ============================================================================
// Module: SigVerdict Cryptographic Constraints
// Description: Algorithm expiration lookups against the policy tables.
// Purpose: Decide whether algorithms and key sizes are acceptable at a time.
// Dependencies: time, verdict-chain, crate::core
// ============================================================================

//! ## Overview
//! Every lookup yields an [`AlgorithmExpiry`]. An expiry that has passed
//! fails with `CRYPTO_CONSTRAINTS_FAILURE_NO_POE`, which an earlier proof of
//! existence may still resolve; an algorithm the policy does not list fails
//! with `CRYPTO_CONSTRAINTS_FAILURE` regardless of time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::constraints::CryptographicRules;
use crate::core::tokens::BasicSignature;
use crate::core::tokens::DigestAlgorithm;
use crate::core::tokens::EncryptionAlgorithm;

// ============================================================================
// SECTION: Expiry
// ============================================================================

/// When an algorithm stops being acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmExpiry {
    /// Never acceptable.
    Unacceptable,
    /// Acceptable at every time.
    Never,
    /// Acceptable strictly before the given time.
    At(OffsetDateTime),
}

impl AlgorithmExpiry {
    /// Maps an optional expiration date.
    #[must_use]
    pub const fn from_expiration(expires: Option<OffsetDateTime>) -> Self {
        match expires {
            Some(expires) => Self::At(expires),
            None => Self::Never,
        }
    }

    /// Returns true when the algorithm is acceptable at `at`.
    #[must_use]
    pub fn acceptable_at(self, at: OffsetDateTime) -> bool {
        match self {
            Self::Unacceptable => false,
            Self::Never => true,
            Self::At(expires) => at < expires,
        }
    }

    /// Returns the verdict reported when the algorithm is not acceptable.
    #[must_use]
    pub const fn failure(self) -> Verdict {
        match self {
            Self::At(_) => Verdict::indeterminate(SubIndication::CryptoConstraintsFailureNoPoe),
            Self::Unacceptable | Self::Never => {
                Verdict::indeterminate(SubIndication::CryptoConstraintsFailure)
            }
        }
    }

    /// Returns the stricter of two expiries.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unacceptable, _) | (_, Self::Unacceptable) => Self::Unacceptable,
            (Self::Never, other) | (other, Self::Never) => other,
            (Self::At(left), Self::At(right)) => Self::At(left.min(right)),
        }
    }

    /// Returns the expiration date, when one applies.
    #[must_use]
    pub const fn expiration(self) -> Option<OffsetDateTime> {
        match self {
            Self::At(expires) => Some(expires),
            Self::Unacceptable | Self::Never => None,
        }
    }
}

// ============================================================================
// SECTION: Lookups
// ============================================================================

/// Looks up a digest algorithm.
#[must_use]
pub fn digest_expiry(rules: &CryptographicRules, algorithm: Option<DigestAlgorithm>) -> AlgorithmExpiry {
    algorithm
        .and_then(|algorithm| rules.digest.iter().find(|rule| rule.algorithm == algorithm))
        .map_or(AlgorithmExpiry::Unacceptable, |rule| AlgorithmExpiry::from_expiration(rule.expires))
}

/// Looks up a signature algorithm and key size; the row with the largest
/// minimum key size not above `key_size` applies.
#[must_use]
pub fn encryption_expiry(
    rules: &CryptographicRules,
    algorithm: Option<EncryptionAlgorithm>,
    key_size: Option<u32>,
) -> AlgorithmExpiry {
    let (Some(algorithm), Some(key_size)) = (algorithm, key_size) else {
        return AlgorithmExpiry::Unacceptable;
    };
    rules
        .encryption
        .iter()
        .filter(|rule| rule.algorithm == algorithm && rule.min_key_size <= key_size)
        .max_by_key(|rule| rule.min_key_size)
        .map_or(AlgorithmExpiry::Unacceptable, |rule| AlgorithmExpiry::from_expiration(rule.expires))
}

/// Looks up both algorithms of a signature.
#[must_use]
pub fn signature_expiry(rules: &CryptographicRules, signature: &BasicSignature) -> AlgorithmExpiry {
    digest_expiry(rules, signature.digest_algorithm).combine(encryption_expiry(
        rules,
        signature.encryption_algorithm,
        signature.key_size,
    ))
}
