// crates/sigverdict-core/src/runtime/engine.rs
// ============================================================================
// Module: SigVerdict Validation Engine
// Description: Single entry point running every stage in dependency order.
// Purpose: Produce one deterministic validation report per fact model.
// Dependencies: thiserror, time, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! [`ValidationEngine::validate`] is the canonical execution path. It builds
//! the certificate chains once, then validates revocation tokens, timestamps,
//! and signatures, each stage reading only the frozen results of the stages
//! before it. The engine holds no mutable state, so one engine may serve
//! concurrent runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;
use time::OffsetDateTime;

use crate::core::arena::DiagnosticData;
use crate::core::arena::FactModelError;
use crate::core::arena::TokenArena;
use crate::core::catalog::MessageCatalog;
use crate::core::constraints::ValidationPolicy;
use crate::core::report::ValidationReport;
use crate::interfaces::ValidationAuditSink;
use crate::runtime::chains::ChainIndex;
use crate::runtime::context::PolicyContext;
use crate::runtime::context::ValidationScope;
use crate::runtime::process::archival::validate_signatures;
use crate::runtime::process::revocation::validate_revocations;
use crate::runtime::process::timestamp::validate_timestamps;
use crate::runtime::revocation::RevocationTrust;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Validation engine errors.
///
/// Indeterminate outcomes are report values, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The fact model cannot be indexed.
    #[error(transparent)]
    FactModel(#[from] FactModelError),
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Signature validation engine bound to one policy and message catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationEngine {
    /// Active policy.
    policy: ValidationPolicy,
    /// Message catalog for titles and failure messages.
    catalog: MessageCatalog,
}

impl ValidationEngine {
    /// Creates an engine.
    #[must_use]
    pub const fn new(policy: ValidationPolicy, catalog: MessageCatalog) -> Self {
        Self {
            policy,
            catalog,
        }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Returns the message catalog.
    #[must_use]
    pub const fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Validates every token of `arena` at `current_time`.
    #[must_use]
    pub fn validate(
        &self,
        arena: &TokenArena,
        current_time: OffsetDateTime,
        audit: &dyn ValidationAuditSink,
    ) -> ValidationReport {
        let ctx = PolicyContext::new(&self.policy, &self.catalog);
        let chains = ChainIndex::build(arena);

        let integrity = ValidationScope::new(arena, &chains, RevocationTrust::Integrity);
        let revocations = validate_revocations(&ctx, &integrity, current_time, audit);
        let revocation_verdicts = revocations.verdicts();

        let scope = ValidationScope::new(arena, &chains, RevocationTrust::Validated(&revocation_verdicts));
        let timestamps = validate_timestamps(&ctx, &scope, current_time, audit);
        let timestamp_verdicts = timestamps.stage.verdicts();
        let signatures = validate_signatures(&ctx, &scope, &timestamps.poe, &timestamp_verdicts, audit);

        let mut building_blocks = BTreeMap::new();
        building_blocks.extend(revocations.building_blocks);
        building_blocks.extend(timestamps.stage.building_blocks);
        building_blocks.extend(signatures.building_blocks);

        ValidationReport {
            validation_time: current_time,
            policy_name: self.policy.name.clone(),
            signatures: signatures.reports,
            timestamps: timestamps.stage.reports,
            revocations: revocations.reports,
            building_blocks,
        }
    }

    /// Indexes `data` and validates it at `current_time`.
    ///
    /// # Errors
    /// Returns [`ValidationError::FactModel`] when two tokens share one identity.
    pub fn validate_diagnostic(
        &self,
        data: DiagnosticData,
        current_time: OffsetDateTime,
        audit: &dyn ValidationAuditSink,
    ) -> Result<ValidationReport, ValidationError> {
        let arena = TokenArena::build(data)?;
        Ok(self.validate(&arena, current_time, audit))
    }
}
