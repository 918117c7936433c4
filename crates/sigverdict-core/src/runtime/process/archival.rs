// crates/sigverdict-core/src/runtime/process/archival.rs
// ============================================================================
// Module: SigVerdict Archival Signature Process
// Description: Final per-signature conclusion using timestamps and POE.
// Purpose: Combine basic validation, time sliding, and timestamp evidence.
// Dependencies: verdict-chain, crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! For each signature the process runs the building blocks at the current
//! time and the basic process over them. A time-sensitive result is handed
//! to past signature validation with the proofs the timestamp stage
//! established. The archival chain then folds in:
//! - whether the basic result was conclusive and, if slid, the sliding result;
//! - the best signature time against the signing certificate issuance;
//! - the verdict of every timestamp over the signature;
//! - the order of content, signature, and archive timestamps.
//!
//! The final verdict is the archival verdict mapped to its `TOTAL_*` form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use time::OffsetDateTime;
use verdict_chain::ChainConclusion;
use verdict_chain::SubIndication;
use verdict_chain::Verdict;

use crate::core::constraints::CheckKey;
use crate::core::identifiers::TokenId;
use crate::core::poe::PoeSet;
use crate::core::poe::ProofOfExistence;
use crate::core::report::AuditEntry;
use crate::core::report::BasicBuildingBlocks;
use crate::core::report::SignatureReport;
use crate::core::report::TimeSlidingConclusion;
use crate::core::tokens::SignatureToken;
use crate::core::tokens::TimestampKind;
use crate::core::tokens::TimestampToken;
use crate::interfaces::AuditEventKind;
use crate::interfaces::AuditStage;
use crate::interfaces::ValidationAuditSink;
use crate::runtime::bbb::BbbSubject;
use crate::runtime::bbb::run_building_blocks;
use crate::runtime::context::PolicyContext;
use crate::runtime::context::ValidationScope;
use crate::runtime::process::audit_event;
use crate::runtime::process::basic::validate_basic;
use crate::runtime::process::building_block_audit;
use crate::runtime::process::malformed_conclusion;
use crate::runtime::structure::signature_defect;
use crate::runtime::time_sliding::slide;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Conclusions of the signature stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureOutcome {
    /// Final reports by signature.
    pub reports: BTreeMap<TokenId, SignatureReport>,
    /// Building block detail by signature; malformed signatures have none.
    pub building_blocks: BTreeMap<TokenId, BasicBuildingBlocks>,
}

// ============================================================================
// SECTION: Process
// ============================================================================

/// Validates every signature in identity order.
#[must_use]
pub fn validate_signatures(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    poe: &PoeSet,
    timestamp_verdicts: &BTreeMap<TokenId, Verdict>,
    audit: &dyn ValidationAuditSink,
) -> SignatureOutcome {
    let mut outcome = SignatureOutcome::default();
    for signature in scope.arena.signatures() {
        if let Some(error) = signature_defect(scope.arena, signature) {
            let conclusion = malformed_conclusion(ctx, &error);
            let mut event = audit_event(
                AuditEventKind::MalformedInput,
                AuditStage::Signatures,
                &signature.id,
                conclusion.verdict,
            );
            event.message = Some(error.to_string());
            audit.record(&event);
            outcome.reports.insert(
                signature.id.clone(),
                SignatureReport {
                    signature_id: signature.id.clone(),
                    verdict: conclusion.verdict.to_total(),
                    best_signature_time: poe.earliest(&signature.id),
                    proof_time: None,
                    audit: AuditEntry::from_conclusion(&conclusion),
                    basic_validation: conclusion.clone(),
                    time_sliding: None,
                    archival_validation: conclusion,
                },
            );
            continue;
        }

        let (report, blocks) = validate_signature(ctx, scope, signature, poe, timestamp_verdicts, audit);
        outcome.reports.insert(signature.id.clone(), report);
        outcome.building_blocks.insert(signature.id.clone(), blocks);
    }
    outcome
}

/// Validates one well-formed signature.
fn validate_signature(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    signature: &SignatureToken,
    poe: &PoeSet,
    timestamp_verdicts: &BTreeMap<TokenId, Verdict>,
    audit: &dyn ValidationAuditSink,
) -> (SignatureReport, BasicBuildingBlocks) {
    let current_time = poe.validation_time();
    let subject = BbbSubject::Signature(signature);
    let blocks = run_building_blocks(ctx, scope, subject, current_time);
    let basic = validate_basic(ctx, scope, signature, &blocks, timestamp_verdicts);

    let time_sliding = if basic.verdict.is_time_sensitive() {
        let sliding = slide(ctx, scope, subject, &blocks, basic.verdict, poe);
        let mut event = audit_event(
            AuditEventKind::TimeSlidingApplied,
            AuditStage::Signatures,
            &signature.id,
            sliding.conclusion.verdict,
        );
        event.proof_time.clone_from(&sliding.proof);
        audit.record(&event);
        Some(sliding)
    } else {
        None
    };

    let best_signature_time = poe.earliest(&signature.id);
    let archival = archival_conclusion(
        ctx,
        scope,
        signature,
        &blocks,
        &basic,
        time_sliding.as_ref(),
        &best_signature_time,
        timestamp_verdicts,
    );
    let verdict = archival.verdict.to_total();
    let proof_time = verdict.is_passed().then(|| {
        time_sliding
            .as_ref()
            .and_then(|sliding| sliding.proof.clone())
            .unwrap_or_else(|| ProofOfExistence::at_validation_time(current_time))
    });

    let mut trail = building_block_audit(&blocks);
    trail.extend(AuditEntry::from_conclusion(&basic));
    if let Some(sliding) = &time_sliding {
        trail.extend(AuditEntry::from_conclusion(&sliding.conclusion));
    }
    trail.extend(AuditEntry::from_conclusion(&archival));

    let mut event = audit_event(AuditEventKind::TokenValidated, AuditStage::Signatures, &signature.id, verdict);
    event.proof_time.clone_from(&proof_time);
    audit.record(&event);

    let report = SignatureReport {
        signature_id: signature.id.clone(),
        verdict,
        best_signature_time,
        proof_time,
        basic_validation: basic,
        time_sliding,
        archival_validation: archival,
        audit: trail,
    };
    (report, blocks)
}

// ============================================================================
// SECTION: Archival Chain
// ============================================================================

/// Builds the archival chain of one signature.
#[allow(clippy::too_many_arguments, reason = "Each input is a distinct stage result.")]
fn archival_conclusion(
    ctx: &PolicyContext<'_>,
    scope: &ValidationScope<'_>,
    signature: &SignatureToken,
    blocks: &BasicBuildingBlocks,
    basic: &ChainConclusion,
    time_sliding: Option<&TimeSlidingConclusion>,
    best_signature_time: &ProofOfExistence,
    timestamp_verdicts: &BTreeMap<TokenId, Verdict>,
) -> ChainConclusion {
    let conclusive = basic.is_passed() || basic.verdict.is_time_sensitive();
    let mut chain = ctx.chain("archival").then(ctx.check(
        CheckKey::BasicValidationConclusive,
        basic.verdict,
        move || conclusive,
    ));
    if let Some(sliding) = time_sliding {
        let passed = sliding.conclusion.is_passed();
        chain.push(ctx.fixed_check("time_sliding_passed", sliding.conclusion.verdict, move || passed));
    }

    let issued = blocks
        .signing_certificate
        .as_ref()
        .and_then(|id| scope.arena.certificate(id))
        .is_none_or(|certificate| best_signature_time.time >= certificate.not_before);
    chain.push(ctx.check(
        CheckKey::BestSignatureTimeNotBeforeIssuance,
        Verdict::failed(SubIndication::NotYetValid),
        move || issued,
    ));

    let timestamps: Vec<&TimestampToken> = scope.arena.timestamps_covering(&signature.id).collect();
    for timestamp in &timestamps {
        let verdict = timestamp_verdicts
            .get(&timestamp.id)
            .copied()
            .unwrap_or(Verdict::indeterminate(SubIndication::Generic));
        let passed = verdict.is_passed();
        chain.push(
            ctx.check(CheckKey::TimestampValid, verdict, move || passed).with_detail(timestamp.id.as_str()),
        );
    }

    let coherent = timestamps_ordered(&timestamps);
    chain.push(ctx.check(
        CheckKey::TimestampOrderCoherent,
        Verdict::indeterminate(SubIndication::TimestampOrderFailure),
        move || coherent,
    ));
    chain.evaluate()
}

/// Returns true when content, signature, and archive timestamps are ordered.
fn timestamps_ordered(timestamps: &[&TimestampToken]) -> bool {
    let times = |kind: TimestampKind| -> Vec<OffsetDateTime> {
        timestamps
            .iter()
            .filter(|timestamp| timestamp.kind == kind)
            .map(|timestamp| timestamp.production_time)
            .collect()
    };
    let content = times(TimestampKind::Content);
    let signature = times(TimestampKind::Signature);
    let archive = times(TimestampKind::Archive);
    let not_after = |earlier: &[OffsetDateTime], later: &[OffsetDateTime]| {
        earlier.iter().all(|early| later.iter().all(|late| early <= late))
    };
    not_after(&content, &signature) && not_after(&content, &archive) && not_after(&signature, &archive)
}
