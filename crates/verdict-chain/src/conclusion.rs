// crates/verdict-chain/src/conclusion.rs
// ============================================================================
// Module: Chain Conclusions
// Description: Immutable results of a finished chain.
// Purpose: Carry the aggregated verdict plus the ordered audit of executed checks.
// Dependencies: serde, crate::{indication, level}
// ============================================================================

//! ## Overview
//! A [`ChainConclusion`] is produced once by [`crate::Chain::evaluate`] and
//! never mutated afterwards. Checks that were not executed because an earlier
//! check failed at [`Level::Fail`] do not appear in [`ChainConclusion::checks`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::indication::Indication;
use crate::indication::SubIndication;
use crate::indication::Verdict;
use crate::level::Level;

// ============================================================================
// SECTION: Check Results
// ============================================================================

/// Outcome status of one executed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The predicate held.
    Ok,
    /// The predicate failed at [`Level::Fail`].
    NotOk,
    /// The predicate failed at [`Level::Warn`].
    Warning,
    /// The predicate failed at [`Level::Inform`].
    Information,
    /// The predicate failed at [`Level::Ignore`].
    Ignored,
}

impl CheckStatus {
    /// Maps a failing predicate at `level` to its status.
    #[must_use]
    pub const fn for_failure(level: Level) -> Self {
        match level {
            Level::Fail => Self::NotOk,
            Level::Warn => Self::Warning,
            Level::Inform => Self::Information,
            Level::Ignore => Self::Ignored,
        }
    }
}

/// Audit record of one executed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Stable check name.
    pub name: String,
    /// Human-readable title.
    pub title: String,
    /// Severity that was applied.
    pub level: Level,
    /// Outcome status.
    pub status: CheckStatus,
    /// Failure message when the predicate failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure codes when the predicate failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Verdict>,
    /// Extra context supplied by the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckResult {
    /// Returns true when the predicate held.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Ok
    }
}

/// Message attached to a conclusion (error, warning, or information).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainMessage {
    /// Name of the check that produced the message.
    pub key: String,
    /// Rendered message.
    pub message: String,
}

// ============================================================================
// SECTION: Chain Conclusion
// ============================================================================

/// Aggregated result of a chain.
///
/// # Invariants
/// - At most one entry in `checks` has status [`CheckStatus::NotOk`], and it
///   is the last entry.
/// - `verdict` is passing iff no entry has status [`CheckStatus::NotOk`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConclusion {
    /// Chain title.
    pub title: String,
    /// Aggregated verdict.
    pub verdict: Verdict,
    /// Executed checks, in execution order.
    pub checks: Vec<CheckResult>,
    /// Messages from blocking failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ChainMessage>,
    /// Messages from [`Level::Warn`] failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ChainMessage>,
    /// Messages from [`Level::Inform`] and [`Level::Ignore`] failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub infos: Vec<ChainMessage>,
}

impl ChainConclusion {
    /// Returns the aggregated indication.
    #[must_use]
    pub const fn indication(&self) -> Indication {
        self.verdict.indication()
    }

    /// Returns the aggregated sub-indication.
    #[must_use]
    pub const fn sub_indication(&self) -> Option<SubIndication> {
        self.verdict.sub_indication()
    }

    /// Returns true when the aggregated verdict is passing.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        self.verdict.is_passed()
    }

    /// Returns the result of the named check, if it was executed.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|result| result.name == name)
    }

    /// Returns true when the named check was executed.
    #[must_use]
    pub fn executed(&self, name: &str) -> bool {
        self.check(name).is_some()
    }
}
