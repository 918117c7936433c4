// crates/verdict-chain/src/check.rs
// ============================================================================
// Module: Checks
// Description: A named, lazily evaluated predicate with severity and failure codes.
// Purpose: Represent one step of a chain as plain data plus a closure.
// Dependencies: crate::{indication, level}
// ============================================================================

//! ## Overview
//! A [`Check`] bundles a stable name, a human title, the severity looked up
//! by the caller, the verdict to adopt on a blocking failure, and a closure
//! that is run at most once. Closures borrow from the caller's fact model, so
//! checks live no longer than the data they inspect.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::indication::Verdict;
use crate::level::Level;

// ============================================================================
// SECTION: Check
// ============================================================================

/// Boxed predicate evaluated once by the chain.
type Predicate<'a> = Box<dyn FnOnce() -> bool + 'a>;

/// One ordered step of a chain.
///
/// # Invariants
/// - `failure` is only adopted when the check fails at [`Level::Fail`].
pub struct Check<'a> {
    /// Stable check name (used as audit key).
    name: String,
    /// Human-readable title.
    title: String,
    /// Severity applied on failure.
    level: Level,
    /// Verdict adopted on a blocking failure.
    failure: Verdict,
    /// Message recorded when the check fails.
    error_message: String,
    /// Optional extra context recorded with the result.
    detail: Option<String>,
    /// Predicate returning true when the check passes.
    predicate: Predicate<'a>,
}

impl<'a> Check<'a> {
    /// Creates a check whose title and error message default to its name.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        level: Level,
        failure: Verdict,
        predicate: impl FnOnce() -> bool + 'a,
    ) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            error_message: name.clone(),
            name,
            level,
            failure,
            detail: None,
            predicate: Box::new(predicate),
        }
    }

    /// Sets the human-readable title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the message recorded on failure.
    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Attaches extra context recorded with the result.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Returns the check name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the severity.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Returns the verdict adopted on a blocking failure.
    #[must_use]
    pub const fn failure(&self) -> Verdict {
        self.failure
    }

    /// Consumes the check, runs the predicate, and returns its parts.
    pub(crate) fn run(self) -> EvaluatedCheck {
        let passed = (self.predicate)();
        EvaluatedCheck {
            name: self.name,
            title: self.title,
            level: self.level,
            failure: self.failure,
            error_message: self.error_message,
            detail: self.detail,
            passed,
        }
    }
}

impl fmt::Debug for Check<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

/// Check parts after the predicate ran.
pub(crate) struct EvaluatedCheck {
    /// Stable check name.
    pub(crate) name: String,
    /// Human-readable title.
    pub(crate) title: String,
    /// Severity applied on failure.
    pub(crate) level: Level,
    /// Verdict adopted on a blocking failure.
    pub(crate) failure: Verdict,
    /// Message recorded on failure.
    pub(crate) error_message: String,
    /// Optional extra context.
    pub(crate) detail: Option<String>,
    /// Predicate outcome.
    pub(crate) passed: bool,
}
