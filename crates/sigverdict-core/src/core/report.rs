// crates/sigverdict-core/src/core/report.rs
// ============================================================================
// Module: SigVerdict Validation Report
// Description: Canonical per-token conclusions and building block detail.
// Purpose: Provide the serializable, deterministic output of one validation run.
// Dependencies: serde, time, verdict-chain, crate::core::{hashing, identifiers, poe}
// ============================================================================

//! ## Overview
//! A [`ValidationReport`] is the only output of a run. Every map is keyed by
//! [`TokenId`] and every list is produced in a fixed order, so serializing
//! the same report twice yields identical bytes and
//! [`ValidationReport::digest`] is stable across runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use verdict_chain::ChainConclusion;
use verdict_chain::CheckStatus;
use verdict_chain::Level;
use verdict_chain::Verdict;

use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::identifiers::TokenId;
use crate::core::identifiers::TokenKind;
use crate::core::poe::ProofOfExistence;

// ============================================================================
// SECTION: Audit Trail
// ============================================================================

/// One executed check, flattened for audit output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Block title the check ran in.
    pub block: String,
    /// Stable check name.
    pub check: String,
    /// Severity the check ran with.
    pub level: Level,
    /// Reported status.
    pub status: CheckStatus,
    /// Whether the predicate held.
    pub passed: bool,
    /// Failure message, when the check failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuditEntry {
    /// Flattens every executed check of `conclusion`.
    #[must_use]
    pub fn from_conclusion(conclusion: &ChainConclusion) -> Vec<Self> {
        conclusion
            .checks
            .iter()
            .map(|check| Self {
                block: conclusion.title.clone(),
                check: check.name.clone(),
                level: check.level,
                status: check.status,
                passed: check.passed(),
                message: check.message.clone(),
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Building Blocks
// ============================================================================

/// Conclusion for one certificate of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateConclusion {
    /// Certificate evaluated.
    pub certificate: TokenId,
    /// Time the certificate was evaluated at.
    #[serde(with = "time::serde::rfc3339")]
    pub target_time: OffsetDateTime,
    /// Check outcomes.
    pub conclusion: ChainConclusion,
}

/// X.509 certificate validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XcvConclusion {
    /// Chain from the signing certificate to the anchor, when one was built.
    pub chain: Vec<TokenId>,
    /// Aggregate outcome.
    pub conclusion: ChainConclusion,
    /// Per-certificate outcomes, signing certificate first.
    pub certificates: Vec<CertificateConclusion>,
}

/// Context a building block run was performed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockContext {
    /// A signature.
    Signature,
    /// A timestamp.
    Timestamp,
    /// A revocation token.
    Revocation,
}

/// Output of the basic building blocks for one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicBuildingBlocks {
    /// Token evaluated.
    pub token_id: TokenId,
    /// Evaluation context.
    pub context: BlockContext,
    /// Signing certificate identified by ISC, if any.
    pub signing_certificate: Option<TokenId>,
    /// Identification of the signing certificate.
    pub isc: ChainConclusion,
    /// Validation context initialization (signatures only).
    pub vci: Option<ChainConclusion>,
    /// X.509 certificate validation.
    pub xcv: XcvConclusion,
    /// Cryptographic verification.
    pub cv: ChainConclusion,
    /// Signature acceptance validation (run only when CV passed).
    pub sav: Option<ChainConclusion>,
    /// Aggregate outcome; the first failing block wins.
    pub conclusion: ChainConclusion,
}

// ============================================================================
// SECTION: Time Sliding
// ============================================================================

/// Event that moved the control time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlTimeReason {
    /// The trust anchor sunset date.
    TrustAnchorSunset,
    /// A certificate revocation date.
    CertificateRevoked,
    /// Revocation data not fresh at the control time.
    RevocationNotFresh,
    /// A certificate algorithm expiration.
    CertificateCryptography,
    /// A signature algorithm expiration.
    SignatureCryptography,
}

/// One control time adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlTimeStep {
    /// Certificate that caused the step, when one did.
    pub certificate: Option<TokenId>,
    /// Cause of the step.
    pub reason: ControlTimeReason,
    /// Control time after the step.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

/// Outcome of past signature validation for one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlidingConclusion {
    /// Final control time.
    #[serde(with = "time::serde::rfc3339")]
    pub control_time: OffsetDateTime,
    /// Control time adjustments, in application order.
    pub control_steps: Vec<ControlTimeStep>,
    /// Proof of existence the token validated at, when one did.
    pub proof: Option<ProofOfExistence>,
    /// Check outcomes.
    pub conclusion: ChainConclusion,
}

// ============================================================================
// SECTION: Token Reports
// ============================================================================

/// Final conclusion for one signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureReport {
    /// Signature evaluated.
    pub signature_id: TokenId,
    /// Final verdict (`TOTAL_PASSED`, `TOTAL_FAILED`, or `INDETERMINATE`).
    pub verdict: Verdict,
    /// Earliest validated proof of existence of the signature.
    pub best_signature_time: ProofOfExistence,
    /// Proof the signature validated at, when it passed.
    pub proof_time: Option<ProofOfExistence>,
    /// Validation process for basic signatures.
    pub basic_validation: ChainConclusion,
    /// Past signature validation, when the basic verdict was time-sensitive.
    pub time_sliding: Option<TimeSlidingConclusion>,
    /// Validation process with archival data.
    pub archival_validation: ChainConclusion,
    /// Every executed check, in execution order.
    pub audit: Vec<AuditEntry>,
}

/// Final conclusion for one timestamp or revocation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReport {
    /// Token evaluated.
    pub token_id: TokenId,
    /// Token kind.
    pub kind: TokenKind,
    /// Final verdict.
    pub verdict: Verdict,
    /// Proof the token validated at, when it passed.
    pub proof_time: Option<ProofOfExistence>,
    /// Basic validation outcome.
    pub conclusion: ChainConclusion,
    /// Past signature validation, when applied.
    pub time_sliding: Option<TimeSlidingConclusion>,
    /// Every executed check, in execution order.
    pub audit: Vec<AuditEntry>,
}

// ============================================================================
// SECTION: Validation Report
// ============================================================================

/// Complete output of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Validation time the run used.
    #[serde(with = "time::serde::rfc3339")]
    pub validation_time: OffsetDateTime,
    /// Name of the policy applied.
    pub policy_name: String,
    /// Signature conclusions.
    pub signatures: BTreeMap<TokenId, SignatureReport>,
    /// Timestamp conclusions.
    pub timestamps: BTreeMap<TokenId, TokenReport>,
    /// Revocation token conclusions.
    pub revocations: BTreeMap<TokenId, TokenReport>,
    /// Building block detail for every evaluated token.
    pub building_blocks: BTreeMap<TokenId, BasicBuildingBlocks>,
}

impl ValidationReport {
    /// Returns the report for one signature.
    #[must_use]
    pub fn signature(&self, id: &TokenId) -> Option<&SignatureReport> {
        self.signatures.get(id)
    }

    /// Returns the report for one timestamp.
    #[must_use]
    pub fn timestamp(&self, id: &TokenId) -> Option<&TokenReport> {
        self.timestamps.get(id)
    }

    /// Returns true when every signature is `TOTAL_PASSED`.
    #[must_use]
    pub fn all_signatures_passed(&self) -> bool {
        self.signatures.values().all(|report| report.verdict.is_passed())
    }

    /// Returns the SHA-256 digest of the canonical JSON form.
    ///
    /// # Errors
    /// Returns [`HashError`] when canonicalization fails.
    pub fn digest(&self) -> Result<HashDigest, HashError> {
        hash_canonical_json(self)
    }
}
