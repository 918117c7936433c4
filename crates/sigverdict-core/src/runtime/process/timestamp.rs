// crates/sigverdict-core/src/runtime/process/timestamp.rs
// ============================================================================
// Module: SigVerdict Timestamp Process
// Description: Timestamp validation with time sliding and POE accumulation.
// Purpose: Validate timestamps and derive the proofs of existence they carry.
// Dependencies: time, verdict-chain, crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! Timestamps are processed newest first so that an archive timestamp, once
//! validated, can supply an earlier proof of existence for the older
//! timestamps it covers. Every validated timestamp extends the POE set; the
//! set in force for a timestamp only holds proofs from timestamps processed
//! before it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;

use crate::core::constraints::CheckKey;
use crate::core::identifiers::TokenKind;
use crate::core::poe::PoeSet;
use crate::core::poe::ProofOfExistence;
use crate::core::report::AuditEntry;
use crate::core::report::TokenReport;
use crate::core::tokens::TimestampToken;
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
use crate::runtime::structure::timestamp_defect;
use crate::runtime::time_sliding::slide;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Conclusions of the timestamp stage plus the proofs they established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampOutcome {
    /// Per-timestamp conclusions.
    pub stage: StageOutcome,
    /// Proofs of existence from every validated timestamp.
    pub poe: PoeSet,
}

// ============================================================================
// SECTION: Process
// ============================================================================

/// Validates every timestamp, newest first.
#[must_use]
pub fn validate_timestamps(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    current_time: OffsetDateTime,
    audit: &dyn ValidationAuditSink,
) -> TimestampOutcome {
    let mut timestamps: Vec<&TimestampToken> = scope.arena.timestamps().collect();
    timestamps.sort_by(|left, right| {
        right.production_time.cmp(&left.production_time).then_with(|| left.id.cmp(&right.id))
    });

    let mut stage = StageOutcome::default();
    let mut poe = PoeSet::new(current_time);
    for timestamp in timestamps {
        if let Some(error) = timestamp_defect(scope.arena, timestamp) {
            stage.record_malformed(ctx, AuditStage::Timestamps, TokenKind::Timestamp, &error, audit);
            continue;
        }

        let subject = BbbSubject::Timestamp(timestamp);
        let blocks = run_building_blocks(ctx, scope, subject, current_time);
        let verdict = basic_verdict(&blocks);
        let time_sliding = if verdict.is_time_sensitive() {
            let sliding = slide(ctx, scope, subject, &blocks, verdict, &poe);
            let mut event = audit_event(
                AuditEventKind::TimeSlidingApplied,
                AuditStage::Timestamps,
                &timestamp.id,
                sliding.conclusion.verdict,
            );
            event.proof_time.clone_from(&sliding.proof);
            audit.record(&event);
            Some(sliding)
        } else {
            None
        };

        let conclusive = verdict.is_passed() || verdict.is_time_sensitive();
        let mut chain = ctx.chain("basic").then(ctx.check(
            CheckKey::BasicValidationConclusive,
            verdict,
            move || conclusive,
        ));
        if let Some(sliding) = &time_sliding {
            let passed = sliding.conclusion.is_passed();
            chain.push(ctx.fixed_check("time_sliding_passed", sliding.conclusion.verdict, move || passed));
        }
        let conclusion = chain.evaluate();

        let proof_time = conclusion.is_passed().then(|| {
            time_sliding
                .as_ref()
                .and_then(|sliding| sliding.proof.clone())
                .unwrap_or_else(|| ProofOfExistence::at_validation_time(current_time))
        });
        if conclusion.is_passed() {
            poe = poe.with_timestamp(timestamp);
        }

        let mut trail = building_block_audit(&blocks);
        if let Some(sliding) = &time_sliding {
            trail.extend(AuditEntry::from_conclusion(&sliding.conclusion));
        }
        trail.extend(AuditEntry::from_conclusion(&conclusion));
        let mut event =
            audit_event(AuditEventKind::TokenValidated, AuditStage::Timestamps, &timestamp.id, conclusion.verdict);
        event.proof_time.clone_from(&proof_time);
        audit.record(&event);

        stage.reports.insert(
            timestamp.id.clone(),
            TokenReport {
                token_id: timestamp.id.clone(),
                kind: TokenKind::Timestamp,
                verdict: conclusion.verdict,
                proof_time,
                conclusion,
                time_sliding,
                audit: trail,
            },
        );
        stage.building_blocks.insert(timestamp.id.clone(), blocks);
    }

    TimestampOutcome {
        stage,
        poe,
    }
}
