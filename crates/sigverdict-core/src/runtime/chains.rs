// crates/sigverdict-core/src/runtime/chains.rs
// ============================================================================
// Module: SigVerdict Chain Building
// Description: Issuer resolution from a signing certificate to a chain top.
// Purpose: Build certificate chains once per run with explicit cycle guards.
// Dependencies: thiserror, verdict-chain, crate::core
// ============================================================================

//! ## Overview
//! Issuer resolution is a lookup over the certificate pool, not an owned
//! pointer, so every walk carries a visited set and a length bound. A walk
//! stops at a trusted or self-signed certificate. Among several issuer
//! candidates the trusted one wins, then the most recently issued one, then
//! the smallest identity, which keeps resolution deterministic.
//!
//! [`ChainIndex::build`] resolves the chain of every certificate once; later
//! stages only read it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use thiserror::Error;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::arena::TokenArena;
use crate::core::identifiers::TokenId;
use crate::core::tokens::CertificateToken;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Longest chain accepted, anchor included.
pub const MAX_CHAIN_LENGTH: usize = 16;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Chain building failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainBuildError {
    /// The start certificate is not in the pool.
    #[error("certificate {certificate} is not in the pool")]
    UnknownCertificate {
        /// Missing certificate.
        certificate: TokenId,
    },
    /// No issuer could be resolved before reaching a chain top.
    #[error("no issuer found for certificate {certificate}")]
    NoIssuer {
        /// Certificate whose issuer is missing.
        certificate: TokenId,
    },
    /// Issuer resolution returned to an already visited certificate.
    #[error("issuer cycle detected at certificate {certificate}")]
    Cycle {
        /// Certificate seen twice.
        certificate: TokenId,
    },
    /// The chain exceeded [`MAX_CHAIN_LENGTH`].
    #[error("certificate chain exceeds {limit} certificates")]
    TooLong {
        /// Length limit.
        limit: usize,
    },
}

impl ChainBuildError {
    /// Returns the verdict reported for this failure.
    #[must_use]
    pub const fn failure(&self) -> Verdict {
        match self {
            Self::UnknownCertificate {
                ..
            }
            | Self::NoIssuer {
                ..
            } => Verdict::indeterminate(SubIndication::NoCertificateChainFound),
            Self::Cycle {
                ..
            }
            | Self::TooLong {
                ..
            } => Verdict::indeterminate(SubIndication::CertificateChainGeneralFailure),
        }
    }
}

// ============================================================================
// SECTION: Chains
// ============================================================================

/// Resolved certificate chain.
///
/// # Invariants
/// - Non-empty; the first entry is the start certificate.
/// - The last entry is trusted or self-signed.
/// - No identity appears twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateChain {
    /// Certificates from the start certificate to the top.
    certificates: Vec<TokenId>,
}

impl CertificateChain {
    /// Returns the identities in chain order.
    #[must_use]
    pub fn certificates(&self) -> &[TokenId] {
        &self.certificates
    }

    /// Returns the chain top.
    #[must_use]
    pub fn top(&self) -> Option<&TokenId> {
        self.certificates.last()
    }

    /// Returns the number of certificates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Returns true when the chain holds no certificate.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}

/// Builds the chain starting at `start`.
///
/// # Errors
/// Returns [`ChainBuildError`] when the start is unknown, an issuer is
/// missing, a cycle is found, or the chain grows past [`MAX_CHAIN_LENGTH`].
pub fn build_chain(arena: &TokenArena, start: &TokenId) -> Result<CertificateChain, ChainBuildError> {
    let mut current = arena.certificate(start).ok_or_else(|| ChainBuildError::UnknownCertificate {
        certificate: start.clone(),
    })?;
    let mut visited = BTreeSet::from([current.id.clone()]);
    let mut certificates = vec![current.id.clone()];

    while !current.is_chain_top() {
        let issuer = resolve_issuer(arena, current).ok_or_else(|| ChainBuildError::NoIssuer {
            certificate: current.id.clone(),
        })?;
        if !visited.insert(issuer.id.clone()) {
            return Err(ChainBuildError::Cycle {
                certificate: issuer.id.clone(),
            });
        }
        certificates.push(issuer.id.clone());
        if certificates.len() > MAX_CHAIN_LENGTH {
            return Err(ChainBuildError::TooLong {
                limit: MAX_CHAIN_LENGTH,
            });
        }
        current = issuer;
    }

    Ok(CertificateChain {
        certificates,
    })
}

/// Picks the issuer of `child` from the pool.
fn resolve_issuer<'a>(arena: &'a TokenArena, child: &CertificateToken) -> Option<&'a CertificateToken> {
    arena
        .certificates()
        .filter(|candidate| {
            candidate.id != child.id
                && candidate.subject == child.issuer
                && key_identifiers_match(child, candidate)
        })
        .max_by(|left, right| issuer_preference(left, right))
}

/// Returns true unless both key identifiers are present and differ.
fn key_identifiers_match(child: &CertificateToken, issuer: &CertificateToken) -> bool {
    match (&child.authority_key_id, &issuer.subject_key_id) {
        (Some(authority), Some(subject)) => authority == subject,
        _ => true,
    }
}

/// Orders issuer candidates; the greatest is preferred.
fn issuer_preference(left: &CertificateToken, right: &CertificateToken) -> Ordering {
    left.trusted
        .cmp(&right.trusted)
        .then_with(|| left.not_before.cmp(&right.not_before))
        .then_with(|| right.id.cmp(&left.id))
}

// ============================================================================
// SECTION: Chain Index
// ============================================================================

/// Chain of every certificate, resolved once per run.
#[derive(Debug, Clone, Default)]
pub struct ChainIndex {
    /// Certificate -> chain or build failure.
    chains: BTreeMap<TokenId, Result<CertificateChain, ChainBuildError>>,
}

impl ChainIndex {
    /// Resolves the chain of every certificate in the arena.
    #[must_use]
    pub fn build(arena: &TokenArena) -> Self {
        Self {
            chains: arena
                .certificates()
                .map(|certificate| (certificate.id.clone(), build_chain(arena, &certificate.id)))
                .collect(),
        }
    }

    /// Returns the chain starting at `certificate`.
    ///
    /// # Errors
    /// Returns the build failure recorded for the certificate, or
    /// [`ChainBuildError::UnknownCertificate`] when it is not in the pool.
    pub fn chain_for(&self, certificate: &TokenId) -> Result<&CertificateChain, ChainBuildError> {
        match self.chains.get(certificate) {
            Some(Ok(chain)) => Ok(chain),
            Some(Err(error)) => Err(error.clone()),
            None => Err(ChainBuildError::UnknownCertificate {
                certificate: certificate.clone(),
            }),
        }
    }
}
