// crates/sigverdict-core/src/runtime/process/mod.rs
// ============================================================================
// Module: SigVerdict Validation Processes
// Description: Per-stage orchestration of building blocks and time sliding.
// Purpose: Turn building block runs into final per-token conclusions.
// Dependencies: verdict-chain, crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! Stages run in dependency order: revocation tokens ([`revocation`]),
//! timestamps newest first ([`timestamp`]), then signatures ([`archival`],
//! which applies [`basic`] first). Each stage reads the results of the stages
//! before it and never writes to them.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod archival;
pub mod basic;
pub mod revocation;
pub mod timestamp;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use verdict_chain::ChainConclusion;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::arena::FactModelError;
use crate::core::identifiers::TokenId;
use crate::core::identifiers::TokenKind;
use crate::core::report::AuditEntry;
use crate::core::report::BasicBuildingBlocks;
use crate::core::report::TokenReport;
use crate::interfaces::AuditEventKind;
use crate::interfaces::AuditStage;
use crate::interfaces::ValidationAuditEvent;
use crate::interfaces::ValidationAuditSink;
use crate::runtime::context::PolicyContext;

// ============================================================================
// SECTION: Stage Outcome
// ============================================================================

/// Conclusions of the revocation or timestamp stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutcome {
    /// Final reports by token.
    pub reports: BTreeMap<TokenId, TokenReport>,
    /// Building block detail by token; malformed tokens have none.
    pub building_blocks: BTreeMap<TokenId, BasicBuildingBlocks>,
}

impl StageOutcome {
    /// Returns the final verdict of every token.
    #[must_use]
    pub fn verdicts(&self) -> BTreeMap<TokenId, Verdict> {
        self.reports.iter().map(|(id, report)| (id.clone(), report.verdict)).collect()
    }

    /// Records a token rejected as malformed and reports it to `audit`.
    pub fn record_malformed(
        &mut self,
        ctx: &PolicyContext<'_>,
        stage: AuditStage,
        kind: TokenKind,
        error: &FactModelError,
        audit: &dyn ValidationAuditSink,
    ) {
        let token_id = match error {
            FactModelError::MalformedToken { id, .. }
            | FactModelError::DuplicateTokenId { id, .. }
            | FactModelError::IdentityMismatch { id, .. } => id.clone(),
        };
        let conclusion = malformed_conclusion(ctx, error);
        let mut event = audit_event(AuditEventKind::MalformedInput, stage, &token_id, conclusion.verdict);
        event.message = Some(error.to_string());
        audit.record(&event);
        self.reports.insert(
            token_id.clone(),
            TokenReport {
                token_id,
                kind,
                verdict: conclusion.verdict,
                proof_time: None,
                audit: AuditEntry::from_conclusion(&conclusion),
                conclusion,
                time_sliding: None,
            },
        );
    }
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Flattens every block of a building block run, in execution order.
#[must_use]
pub fn building_block_audit(blocks: &BasicBuildingBlocks) -> Vec<AuditEntry> {
    let mut entries = AuditEntry::from_conclusion(&blocks.isc);
    if let Some(vci) = &blocks.vci {
        entries.extend(AuditEntry::from_conclusion(vci));
    }
    for certificate in &blocks.xcv.certificates {
        entries.extend(AuditEntry::from_conclusion(&certificate.conclusion));
    }
    entries.extend(AuditEntry::from_conclusion(&blocks.xcv.conclusion));
    entries.extend(AuditEntry::from_conclusion(&blocks.cv));
    if let Some(sav) = &blocks.sav {
        entries.extend(AuditEntry::from_conclusion(sav));
    }
    entries.extend(AuditEntry::from_conclusion(&blocks.conclusion));
    entries
}

/// Builds the conclusion of a token rejected as malformed.
///
/// The defect is recorded as the message of a single failed check so it
/// reaches the audit trail.
#[must_use]
pub fn malformed_conclusion(ctx: &PolicyContext<'_>, error: &FactModelError) -> ChainConclusion {
    ctx.chain("malformed")
        .then(
            ctx.fixed_check(
                "token_well_formed",
                Verdict::indeterminate(SubIndication::CertificateChainGeneralFailure),
                || false,
            )
            .with_error_message(error.to_string()),
        )
        .evaluate()
}

/// Builds an audit event without proof time or message.
#[must_use]
pub fn audit_event(
    event: AuditEventKind,
    stage: AuditStage,
    token_id: &TokenId,
    verdict: Verdict,
) -> ValidationAuditEvent {
    ValidationAuditEvent {
        event,
        stage,
        token_id: token_id.clone(),
        verdict,
        proof_time: None,
        message: None,
    }
}
