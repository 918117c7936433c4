// crates/sigverdict-core/src/core/poe.rs
// ============================================================================
// Module: SigVerdict Proof of Existence
// Description: Per-token sets of times at which existence is attested.
// Purpose: Supply time-sliding with candidate times without shared mutation.
// Dependencies: serde, time, crate::core::{identifiers, tokens}
// ============================================================================

//! ## Overview
//! Every token trivially exists at the validation time. Validated timestamps
//! add earlier proofs for the tokens they cover:
//! - a signature timestamp proves its own signature
//!   ([`PoeProvenance::OwnTimestamp`]);
//! - an archive timestamp proves everything it covers
//!   ([`PoeProvenance::CoveringTimestamp`]);
//! - a content timestamp proves the signed content only and adds nothing.
//!
//! [`PoeSet::with_timestamp`] returns a new set; an existing set is never
//! modified, so every reader sees a fixed snapshot.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

use crate::core::identifiers::TokenId;
use crate::core::tokens::TimestampKind;
use crate::core::tokens::TimestampToken;

// ============================================================================
// SECTION: Proofs
// ============================================================================

/// Source of a proof of existence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoeProvenance {
    /// The validation time itself.
    ValidationTime,
    /// The token's own signature timestamp.
    OwnTimestamp {
        /// Timestamp providing the proof.
        timestamp: TokenId,
    },
    /// An archive timestamp covering the token.
    CoveringTimestamp {
        /// Timestamp providing the proof.
        timestamp: TokenId,
    },
}

/// One attested existence time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProofOfExistence {
    /// Time at which the token provably existed.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Where the proof comes from.
    pub provenance: PoeProvenance,
}

impl ProofOfExistence {
    /// Proof at the validation time.
    #[must_use]
    pub const fn at_validation_time(time: OffsetDateTime) -> Self {
        Self {
            time,
            provenance: PoeProvenance::ValidationTime,
        }
    }
}

// ============================================================================
// SECTION: POE Set
// ============================================================================

/// Immutable map from token identity to attested existence times.
///
/// # Invariants
/// - No stored proof is later than `validation_time`.
/// - The validation-time proof is implicit for every identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoeSet {
    /// Validation time every token exists at.
    validation_time: OffsetDateTime,
    /// Proofs contributed by validated timestamps.
    proofs: BTreeMap<TokenId, BTreeSet<ProofOfExistence>>,
}

impl PoeSet {
    /// Creates a set holding only the implicit validation-time proofs.
    #[must_use]
    pub const fn new(validation_time: OffsetDateTime) -> Self {
        Self {
            validation_time,
            proofs: BTreeMap::new(),
        }
    }

    /// Returns the validation time.
    #[must_use]
    pub const fn validation_time(&self) -> OffsetDateTime {
        self.validation_time
    }

    /// Returns a new set extended with the proofs a validated timestamp provides.
    #[must_use]
    pub fn with_timestamp(&self, timestamp: &TimestampToken) -> Self {
        let mut next = self.clone();
        if timestamp.production_time > self.validation_time {
            return next;
        }
        for covered in &timestamp.covered {
            let provenance = match timestamp.kind {
                TimestampKind::Content => continue,
                TimestampKind::Signature => PoeProvenance::OwnTimestamp {
                    timestamp: timestamp.id.clone(),
                },
                TimestampKind::Archive => PoeProvenance::CoveringTimestamp {
                    timestamp: timestamp.id.clone(),
                },
            };
            next.proofs.entry(covered.clone()).or_default().insert(ProofOfExistence {
                time: timestamp.production_time,
                provenance,
            });
        }
        next
    }

    /// Returns every proof for `id`, latest first, validation time included.
    ///
    /// Proofs sharing one time are collapsed to the first in provenance order.
    #[must_use]
    pub fn proofs_latest_first(&self, id: &TokenId) -> Vec<ProofOfExistence> {
        let mut proofs = vec![ProofOfExistence::at_validation_time(self.validation_time)];
        if let Some(stored) = self.proofs.get(id) {
            proofs.extend(stored.iter().cloned());
        }
        proofs.sort_by(|left, right| {
            right.time.cmp(&left.time).then_with(|| left.provenance.cmp(&right.provenance))
        });
        proofs.dedup_by(|later, earlier| later.time == earlier.time);
        proofs
    }

    /// Returns the earliest proof for `id` (the best signature time).
    #[must_use]
    pub fn earliest(&self, id: &TokenId) -> ProofOfExistence {
        self.proofs
            .get(id)
            .and_then(|stored| stored.iter().next())
            .filter(|proof| proof.time < self.validation_time)
            .cloned()
            .unwrap_or_else(|| ProofOfExistence::at_validation_time(self.validation_time))
    }

    /// Returns true when `id` has a proof at or before `time`.
    #[must_use]
    pub fn has_proof_at_or_before(&self, id: &TokenId, time: OffsetDateTime) -> bool {
        self.earliest(id).time <= time
    }
}
