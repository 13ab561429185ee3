// crates/backstop-harness/src/probe.rs
// ============================================================================
// Module: Probe Failures and Assertions
// Description: Per-case error taxonomy and assertion helpers.
// Purpose: Express every way a probe case can fail with a stable variant.
// Dependencies: backstop-core, thiserror
// ============================================================================

//! ## Overview
//! A probe case fails for one of four reasons: a bundled resource problem,
//! a backend error, an expectation that timed out or was abandoned, or an
//! assertion mismatch. All four are terminal to the owning case. The
//! helpers here keep suite code declarative: resolve-or-fail, exact-length,
//! equality, and the expectation await that folds a backend verdict and a
//! timeout into one result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;

use backstop_core::BackendError;
use backstop_core::Expectation;
use backstop_core::ExpectationError;
use backstop_core::ResourceBundle;
use backstop_core::ResourceError;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Terminal failure of a single probe case.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages are human-readable and safe to persist in reports.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A bundled resource was absent or unreadable.
    #[error(transparent)]
    Resource(#[from] ResourceError),
    /// The backend reported an operation error.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// The case's expectation timed out or was abandoned.
    #[error(transparent)]
    Expectation(#[from] ExpectationError),
    /// An asserted value did not match.
    #[error("assertion mismatch: expected {expected}, actual {actual}")]
    Mismatch {
        /// The expected value.
        expected: String,
        /// The observed value.
        actual: String,
    },
}

// ============================================================================
// SECTION: Expectation Await
// ============================================================================

/// Awaits a case's expectation, folding the backend verdict and the timeout
/// into one probe result.
///
/// # Errors
///
/// Returns [`ProbeError::Expectation`] when the timeout elapses or the
/// completion is dropped, and [`ProbeError::Backend`] when the fulfilled
/// verdict is an error.
pub async fn await_case<T>(
    expectation: Expectation<Result<T, BackendError>>,
    timeout: Duration,
) -> Result<T, ProbeError> {
    match expectation.await_within(timeout).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(ProbeError::Backend(err)),
        Err(err) => Err(ProbeError::Expectation(err)),
    }
}

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Resolves a bundled resource or fails the case.
///
/// # Errors
///
/// Returns [`ProbeError::Resource`] when the resource is absent.
pub fn require_resource(
    bundle: &ResourceBundle,
    name: &str,
    extension: &str,
) -> Result<PathBuf, ProbeError> {
    bundle
        .resolve(name, extension)
        .ok_or_else(|| {
            ProbeError::Resource(ResourceError::NotFound {
                name: name.to_string(),
                extension: extension.to_string(),
            })
        })
}

/// Reads a bundled resource and asserts its exact byte length.
///
/// # Errors
///
/// Returns [`ProbeError::Resource`] when the resource is absent or
/// unreadable and [`ProbeError::Mismatch`] when the length differs.
pub fn require_length(
    bundle: &ResourceBundle,
    name: &str,
    extension: &str,
    expected_len: usize,
) -> Result<Vec<u8>, ProbeError> {
    let bytes = bundle.read(name, extension)?;
    if bytes.len() != expected_len {
        return Err(ProbeError::Mismatch {
            expected: format!("{expected_len} bytes"),
            actual: format!("{} bytes", bytes.len()),
        });
    }
    Ok(bytes)
}

/// Asserts two values are equal or fails the case with both renderings.
///
/// # Errors
///
/// Returns [`ProbeError::Mismatch`] when the values differ.
pub fn require_eq<T: PartialEq + Display>(expected: &T, actual: &T) -> Result<(), ProbeError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ProbeError::Mismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}
