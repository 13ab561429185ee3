// crates/backstop-core/src/core/time.rs
// ============================================================================
// Module: Backstop Time Model
// Description: Canonical timestamp representation for documents and reports.
// Purpose: Provide explicit time values with a stable RFC 3339 wire form.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Document payloads are flat scalar maps, so creation times travel as
//! RFC 3339 strings rather than native date objects. [`Timestamp`] holds
//! unix epoch milliseconds and renders the wire form on demand; values are
//! captured explicitly at the call site, never implicitly inside the data
//! model.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Errors raised when rendering timestamps.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// The millisecond value is outside the representable date range.
    #[error("timestamp {millis} ms is out of range")]
    OutOfRange {
        /// The offending millisecond value.
        millis: i64,
    },
}

/// Unix epoch milliseconds with an RFC 3339 wire form.
///
/// # Invariants
/// - Captured explicitly by callers; comparisons are on the raw millisecond
///   value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix epoch milliseconds.
    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Captures the current wall-clock time.
    ///
    /// Clamps to zero if the system clock reports a pre-epoch time.
    #[must_use]
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(i64::try_from(millis).unwrap_or(i64::MAX))
    }

    /// Returns the raw unix millisecond value.
    #[must_use]
    pub const fn as_unix_millis(self) -> i64 {
        self.0
    }

    /// Renders the RFC 3339 wire form, e.g. `2026-08-06T14:21:09Z`.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::OutOfRange`] when the value cannot be
    /// represented as a calendar date.
    pub fn rfc3339(self) -> Result<String, TimestampError> {
        let nanos = i128::from(self.0) * 1_000_000;
        let datetime = OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|_| {
            TimestampError::OutOfRange {
                millis: self.0,
            }
        })?;
        datetime.format(&Rfc3339).map_err(|_| TimestampError::OutOfRange {
            millis: self.0,
        })
    }
}
