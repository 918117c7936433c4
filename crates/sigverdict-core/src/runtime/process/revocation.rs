// crates/sigverdict-core/src/runtime/process/revocation.rs
// ============================================================================
// Module: SigVerdict Revocation Token Process
// Description: Basic validation of CRLs and OCSP responses.
// Purpose: Decide which revocation tokens later stages may rely on.
// Dependencies: time, crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! Revocation tokens are validated at the current time only. While this
//! stage runs, revocation data about the responder certificates counts when
//! its signature is intact and its issuer is identified; the verdicts produced
//! here then gate the timestamp and signature stages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;

use crate::core::identifiers::TokenKind;
use crate::core::poe::ProofOfExistence;
use crate::core::report::AuditEntry;
use crate::core::report::TokenReport;
use crate::interfaces::AuditEventKind;
use crate::interfaces::AuditStage;
use crate::interfaces::ValidationAuditSink;
use crate::runtime::bbb::BbbSubject;
use crate::runtime::bbb::run_building_blocks;
use crate::runtime::context::PolicyContext;
use crate::runtime::context::ValidationScope;
use crate::runtime::precedence::basic_verdict;
use crate::runtime::process::StageOutcome;
use crate::runtime::process::audit_event;
use crate::runtime::process::building_block_audit;
use crate::runtime::structure::revocation_defect;

// ============================================================================
// SECTION: Process
// ============================================================================

/// Validates every revocation token in identity order.
#[must_use]
pub fn validate_revocations(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    current_time: OffsetDateTime,
    audit: &dyn ValidationAuditSink,
) -> StageOutcome {
    let mut outcome = StageOutcome::default();
    for token in scope.arena.revocations() {
        if let Some(error) = revocation_defect(scope.arena, token) {
            outcome.record_malformed(ctx, AuditStage::Revocations, TokenKind::Revocation, &error, audit);
            continue;
        }

        let blocks = run_building_blocks(ctx, scope, BbbSubject::Revocation(token), current_time);
        let verdict = basic_verdict(&blocks);
        let passed = verdict.is_passed();
        let conclusion = ctx
            .chain("basic")
            .then(ctx.fixed_check("building_blocks_passed", verdict, move || passed))
            .evaluate();
        let proof_time = conclusion.is_passed().then(|| ProofOfExistence::at_validation_time(current_time));

        let mut trail = building_block_audit(&blocks);
        trail.extend(AuditEntry::from_conclusion(&conclusion));
        let mut event =
            audit_event(AuditEventKind::TokenValidated, AuditStage::Revocations, &token.id, conclusion.verdict);
        event.proof_time.clone_from(&proof_time);
        audit.record(&event);

        outcome.reports.insert(
            token.id.clone(),
            TokenReport {
                token_id: token.id.clone(),
                kind: TokenKind::Revocation,
                verdict: conclusion.verdict,
                proof_time,
                conclusion,
                time_sliding: None,
                audit: trail,
            },
        );
        outcome.building_blocks.insert(token.id.clone(), blocks);
    }
    outcome
}
