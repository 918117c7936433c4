// crates/sigverdict-core/src/runtime/revocation.rs
// ============================================================================
// Module: SigVerdict Revocation Status
// Description: Selection and interpretation of revocation entries.
// Purpose: Answer revoked, on-hold, and freshness questions at a target time.
// Dependencies: time, verdict-chain, crate::core
// ============================================================================

//! ## Overview
//! Revocation tokens are evaluated before anything that depends on them.
//! While they are being evaluated, [`RevocationTrust::Integrity`] accepts a
//! token whose signature is intact and whose issuer is in the pool. Later
//! stages use [`RevocationTrust::Validated`], which only accepts tokens whose
//! own verdict passed or may still pass at an earlier time.
//!
//! For a certificate the latest accepted entry with a known status is used.
//! Revocation data is fresh for a target time when it was issued at or after
//! it, or when the age at that time is within the freshness window.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use time::OffsetDateTime;
use verdict_chain::Verdict;

use crate::core::arena::TokenArena;
use crate::core::constraints::RevocationRules;
use crate::core::identifiers::TokenId;
use crate::core::tokens::CertificateStatus;
use crate::core::tokens::RevocationEntry;
use crate::core::tokens::RevocationReason;
use crate::core::tokens::RevocationToken;

// ============================================================================
// SECTION: Trust
// ============================================================================

/// Rule deciding which revocation tokens count as evidence.
#[derive(Debug, Clone, Copy)]
pub enum RevocationTrust<'a> {
    /// Signature intact and issuer present in the pool.
    Integrity,
    /// Verdicts computed by the revocation stage.
    Validated(&'a BTreeMap<TokenId, Verdict>),
}

impl RevocationTrust<'_> {
    /// Returns true when `token` counts as evidence.
    #[must_use]
    pub fn accepts(&self, arena: &TokenArena, token: &RevocationToken) -> bool {
        match self {
            Self::Integrity => {
                token.signature.intact
                    && token
                        .issuer_certificate
                        .as_ref()
                        .is_some_and(|issuer| arena.certificate(issuer).is_some())
            }
            Self::Validated(verdicts) => verdicts
                .get(&token.id)
                .is_some_and(|verdict| verdict.is_passed() || verdict.is_time_sensitive()),
        }
    }
}

// ============================================================================
// SECTION: Status
// ============================================================================

/// One revocation entry with the token that carries it.
#[derive(Debug, Clone, Copy)]
pub struct RevocationStatus<'a> {
    /// Carrying token.
    pub token: &'a RevocationToken,
    /// Entry about the certificate.
    pub entry: &'a RevocationEntry,
}

impl RevocationStatus<'_> {
    /// Returns the time the revocation took effect.
    #[must_use]
    pub fn revocation_time(&self) -> OffsetDateTime {
        self.entry.revocation_date.unwrap_or(self.token.this_update)
    }

    /// Returns true for a revocation that is not a hold.
    #[must_use]
    pub fn is_revocation(&self) -> bool {
        self.entry.status == CertificateStatus::Revoked
            && self.entry.reason != Some(RevocationReason::CertificateHold)
    }

    /// Returns true when the certificate is revoked at `at`.
    #[must_use]
    pub fn is_revoked_at(&self, at: OffsetDateTime) -> bool {
        self.is_revocation() && self.revocation_time() <= at
    }

    /// Returns true when the certificate is on hold at `at`.
    #[must_use]
    pub fn is_on_hold_at(&self, at: OffsetDateTime) -> bool {
        self.entry.status == CertificateStatus::Revoked
            && self.entry.reason == Some(RevocationReason::CertificateHold)
            && self.revocation_time() <= at
    }

    /// Returns true when a CA revocation invalidates past use of the key.
    #[must_use]
    pub const fn compromises_key(&self) -> bool {
        matches!(
            self.entry.reason,
            None | Some(RevocationReason::Unspecified | RevocationReason::KeyCompromise)
        )
    }

    /// Returns true when the data is fresh enough for `at`.
    #[must_use]
    pub fn is_fresh_at(&self, at: OffsetDateTime, rules: &RevocationRules) -> bool {
        if self.token.this_update >= at {
            return true;
        }
        let age = at - self.token.this_update;
        let window = rules
            .max_freshness
            .or_else(|| self.token.next_update.map(|next| next - self.token.this_update));
        window.is_none_or(|window| age <= window)
    }
}

/// Returns the latest accepted entry with a known status for `certificate`.
#[must_use]
pub fn latest_revocation<'a>(
    arena: &'a TokenArena,
    trust: &RevocationTrust<'_>,
    certificate: &TokenId,
) -> Option<RevocationStatus<'a>> {
    arena
        .revocation_entries_for(certificate)
        .filter(|(token, entry)| {
            entry.status != CertificateStatus::Unknown && trust.accepts(arena, token)
        })
        .max_by(|(left, _), (right, _)| {
            left.this_update.cmp(&right.this_update).then_with(|| right.id.cmp(&left.id))
        })
        .map(|(token, entry)| RevocationStatus {
            token,
            entry,
        })
}
