// crates/sigverdict-core/src/core/time.rs
// ============================================================================
// Module: SigVerdict Time Model
// Description: Helpers over injected validation times.
// Purpose: Keep time handling deterministic and formatting infallible.
// Dependencies: time
// ============================================================================

//! ## Overview
//! The engine never reads wall-clock time. Callers pass the current
//! validation time explicitly, and every earlier time the engine reasons
//! about comes from the fact model or from proofs of existence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Formats a time as RFC 3339, falling back to the unix timestamp.
#[must_use]
pub fn format_time(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_else(|_| value.unix_timestamp().to_string())
}

/// Returns the earlier of two times.
#[must_use]
pub fn earliest(left: OffsetDateTime, right: OffsetDateTime) -> OffsetDateTime {
    if right < left { right } else { left }
}
