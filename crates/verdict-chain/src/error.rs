// crates/verdict-chain/src/error.rs
// ============================================================================
// Module: Verdict Error Definitions
// Description: Structured diagnostics for inconsistent verdict pairs.
// Purpose: Reject indication/sub-indication combinations outside the mapping table.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Verdicts built through the infallible constructors are consistent by
//! construction. Verdicts arriving from the outside (deserialized reports,
//! explicit pairs) go through [`crate::Verdict::new`], which reports the
//! violation with one of these variants.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::indication::Indication;
use crate::indication::SubIndication;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when an indication/sub-indication pair violates the table.
///
/// # Invariants
/// - Each variant names the offending indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerdictError {
    /// The indication requires a sub-indication but none was provided.
    #[error("indication {indication} requires a sub-indication")]
    MissingSubIndication {
        /// Offending indication.
        indication: Indication,
    },
    /// The indication never carries a sub-indication.
    #[error("indication {indication} does not accept sub-indication {sub_indication}")]
    UnexpectedSubIndication {
        /// Offending indication.
        indication: Indication,
        /// Sub-indication that was supplied.
        sub_indication: SubIndication,
    },
    /// The sub-indication belongs to a different indication.
    #[error("sub-indication {sub_indication} is not allowed under indication {indication}")]
    InconsistentSubIndication {
        /// Offending indication.
        indication: Indication,
        /// Sub-indication that was supplied.
        sub_indication: SubIndication,
    },
}
