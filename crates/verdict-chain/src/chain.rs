// crates/verdict-chain/src/chain.rs
// ============================================================================
// Module: Chain Engine
// Description: Ordered evaluation of checks with severity-aware short-circuit.
// Purpose: Produce one immutable conclusion from a sequence of checks.
// Dependencies: crate::{check, conclusion, indication, level, trace}
// ============================================================================

//! ## Overview
//! [`Chain::evaluate`] runs checks in insertion order:
//! - a passing check is recorded and evaluation continues;
//! - a failing check at [`Level::Warn`], [`Level::Inform`], or
//!   [`Level::Ignore`] is recorded with its message and evaluation continues;
//! - a failing check at [`Level::Fail`] is recorded, its failure verdict
//!   becomes the chain verdict, and no later check runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::check::Check;
use crate::conclusion::ChainConclusion;
use crate::conclusion::ChainMessage;
use crate::conclusion::CheckResult;
use crate::conclusion::CheckStatus;
use crate::indication::Verdict;
use crate::level::Level;
use crate::trace::ChainTrace;
use crate::trace::NoopTrace;

// ============================================================================
// SECTION: Chain
// ============================================================================

/// Ordered list of checks sharing one title.
#[derive(Debug)]
pub struct Chain<'a> {
    /// Title copied into the conclusion.
    title: String,
    /// Checks in evaluation order.
    checks: Vec<Check<'a>>,
}

impl<'a> Chain<'a> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            checks: Vec::new(),
        }
    }

    /// Appends a check and returns the chain.
    #[must_use]
    pub fn then(mut self, check: Check<'a>) -> Self {
        self.checks.push(check);
        self
    }

    /// Appends a check in place.
    pub fn push(&mut self, check: Check<'a>) {
        self.checks.push(check);
    }

    /// Returns the number of queued checks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true when no check is queued.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Evaluates the chain without tracing.
    #[must_use]
    pub fn evaluate(self) -> ChainConclusion {
        let mut trace = NoopTrace;
        self.evaluate_with_trace(&mut trace)
    }

    /// Evaluates the chain, notifying `trace` after each executed check.
    #[must_use]
    pub fn evaluate_with_trace<T: ChainTrace>(self, trace: &mut T) -> ChainConclusion {
        let mut conclusion = ChainConclusion {
            title: self.title,
            verdict: Verdict::passed(),
            checks: Vec::with_capacity(self.checks.len()),
            errors: Vec::new(),
            warnings: Vec::new(),
            infos: Vec::new(),
        };

        for check in self.checks {
            let evaluated = check.run();
            let status = if evaluated.passed {
                CheckStatus::Ok
            } else {
                CheckStatus::for_failure(evaluated.level)
            };
            let blocking = status == CheckStatus::NotOk;

            if !evaluated.passed {
                let message = ChainMessage {
                    key: evaluated.name.clone(),
                    message: evaluated.error_message.clone(),
                };
                match evaluated.level {
                    Level::Fail => conclusion.errors.push(message),
                    Level::Warn => conclusion.warnings.push(message),
                    Level::Inform | Level::Ignore => conclusion.infos.push(message),
                }
            }

            let result = CheckResult {
                name: evaluated.name,
                title: evaluated.title,
                level: evaluated.level,
                status,
                message: (!evaluated.passed).then_some(evaluated.error_message),
                failure: (!evaluated.passed).then_some(evaluated.failure),
                detail: evaluated.detail,
            };
            trace.on_check_evaluated(&result);
            conclusion.checks.push(result);

            if blocking {
                conclusion.verdict = evaluated.failure;
                break;
            }
        }

        trace.on_chain_completed(&conclusion);
        conclusion
    }
}
