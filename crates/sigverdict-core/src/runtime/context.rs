// crates/sigverdict-core/src/runtime/context.rs
// ============================================================================
// Module: SigVerdict Evaluation Context
// Description: Explicit policy and fact-model handles passed to every block.
// Purpose: Replace global policy and message lookups with borrowed context.
// Dependencies: verdict-chain, crate::core, crate::runtime::{chains, revocation}
// ============================================================================

//! ## Overview
//! [`PolicyContext`] couples the immutable policy with the message catalog
//! and builds checks whose level, title, and message come from them.
//! [`ValidationScope`] bundles what one stage reads: the arena, the chain
//! index, and the revocation acceptance rule for that stage.

// ============================================================================
// SECTION: Imports
// ============================================================================

use verdict_chain::Chain;
use verdict_chain::Check;
use verdict_chain::Level;
use verdict_chain::Verdict;

use crate::core::arena::TokenArena;
use crate::core::catalog::MessageCatalog;
use crate::core::constraints::CheckKey;
use crate::core::constraints::ValidationPolicy;
use crate::runtime::chains::ChainIndex;
use crate::runtime::revocation::RevocationTrust;

// ============================================================================
// SECTION: Policy Context
// ============================================================================

/// Immutable policy plus message catalog.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    /// Active policy.
    policy: &'a ValidationPolicy,
    /// Message catalog.
    catalog: &'a MessageCatalog,
}

impl<'a> PolicyContext<'a> {
    /// Creates a context.
    #[must_use]
    pub const fn new(policy: &'a ValidationPolicy, catalog: &'a MessageCatalog) -> Self {
        Self {
            policy,
            catalog,
        }
    }

    /// Returns the policy.
    #[must_use]
    pub const fn policy(&self) -> &'a ValidationPolicy {
        self.policy
    }

    /// Returns the severity configured for `key`.
    #[must_use]
    pub fn level(&self, key: CheckKey) -> Level {
        self.policy.level(key)
    }

    /// Returns the localized title of a block.
    #[must_use]
    pub fn title(&self, block: &str) -> String {
        self.catalog.render(&format!("block.{block}"))
    }

    /// Returns the localized title of a block with placeholders substituted.
    #[must_use]
    pub fn title_with(&self, block: &str, args: &[(&str, &str)]) -> String {
        self.catalog.render_with(&format!("block.{block}"), args)
    }

    /// Starts an empty chain titled after `block`.
    #[must_use]
    pub fn chain<'c>(&self, block: &str) -> Chain<'c> {
        Chain::new(self.title(block))
    }

    /// Builds a configurable check.
    pub fn check<'c>(
        &self,
        key: CheckKey,
        failure: Verdict,
        predicate: impl FnOnce() -> bool + 'c,
    ) -> Check<'c> {
        self.named(key.as_str(), self.level(key), failure, predicate)
    }

    /// Builds a check that always blocks on failure.
    ///
    /// Used for checks that fold an earlier conclusion into a later chain.
    pub fn fixed_check<'c>(
        &self,
        name: &str,
        failure: Verdict,
        predicate: impl FnOnce() -> bool + 'c,
    ) -> Check<'c> {
        self.named(name, Level::Fail, failure, predicate)
    }

    /// Builds a check with catalog title and message.
    fn named<'c>(
        &self,
        name: &str,
        level: Level,
        failure: Verdict,
        predicate: impl FnOnce() -> bool + 'c,
    ) -> Check<'c> {
        Check::new(name, level, failure, predicate)
            .with_title(self.catalog.render(&format!("{name}.title")))
            .with_error_message(self.catalog.render(&format!("{name}.error")))
    }
}

// ============================================================================
// SECTION: Validation Scope
// ============================================================================

/// Read-only inputs of one validation stage.
#[derive(Debug, Clone, Copy)]
pub struct ValidationScope<'a> {
    /// Token arena.
    pub arena: &'a TokenArena,
    /// Precomputed certificate chains.
    pub chains: &'a ChainIndex,
    /// Which revocation tokens count as evidence in this stage.
    pub revocation_trust: RevocationTrust<'a>,
}

impl<'a> ValidationScope<'a> {
    /// Creates a scope.
    #[must_use]
    pub const fn new(
        arena: &'a TokenArena,
        chains: &'a ChainIndex,
        revocation_trust: RevocationTrust<'a>,
    ) -> Self {
        Self {
            arena,
            chains,
            revocation_trust,
        }
    }
}
