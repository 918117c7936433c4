// crates/verdict-chain/src/level.rs
// ============================================================================
// Module: Severity Levels
// Description: Severity applied to a failing check.
// Purpose: Decide whether a failing check stops the chain or is only recorded.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Level`] is looked up from the caller's constraint table for every
//! check. Only [`Level::Fail`] affects the chain verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Level
// ============================================================================

/// Severity applied when a check does not pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Failure stops the chain and sets its verdict.
    Fail,
    /// Failure is recorded as a warning.
    Warn,
    /// Failure is recorded as information.
    Inform,
    /// Failure is recorded as ignored.
    Ignore,
}

impl Level {
    /// Every level, from most to least severe.
    pub const ALL: [Self; 4] = [Self::Fail, Self::Warn, Self::Inform, Self::Ignore];

    /// Returns the configuration label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Warn => "warn",
            Self::Inform => "inform",
            Self::Ignore => "ignore",
        }
    }

    /// Parses a configuration label (case-insensitive).
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
