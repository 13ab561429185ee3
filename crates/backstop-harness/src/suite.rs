// crates/backstop-harness/src/suite.rs
// ============================================================================
// Module: Suite Runner
// Description: Sequential case execution and canonical report artifacts.
// Purpose: Capture one terminal record per case and persist suite reports.
// Dependencies: backstop-core, serde_jcs
// ============================================================================

//! ## Overview
//! [`SuiteRunner`] executes cases one at a time in registration order. A
//! case is an async closure returning a probe result; its failure is folded
//! into a report record and the runner moves on, so one bad case never
//! costs the rest of the suite. Finished reports serialize with canonical
//! JSON so artifact diffs are stable across runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use backstop_core::CaseKind;
use backstop_core::CaseName;
use backstop_core::CaseOutcome;
use backstop_core::CaseReport;
use backstop_core::SuiteReport;
use thiserror::Error;

use crate::probe::ProbeError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Report persistence errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report could not be serialized.
    #[error("report serialization failed: {0}")]
    Serialize(String),
    /// The report could not be written to disk.
    #[error("report write failed: {0}")]
    Write(String),
}

// ============================================================================
// SECTION: Suite Runner
// ============================================================================

/// Sequential probe scheduler.
///
/// # Invariants
/// - Cases run in registration order, one at a time.
/// - Every executed case leaves exactly one report record.
#[derive(Debug, Default)]
pub struct SuiteRunner {
    /// Accumulated per-case records.
    report: SuiteReport,
}

impl SuiteRunner {
    /// Creates a runner with an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one case to its terminal outcome and records it.
    ///
    /// The case body owns its assertions; any [`ProbeError`] it returns
    /// becomes the recorded failure reason.
    pub async fn run_case(
        &mut self,
        name: &str,
        kind: CaseKind,
        case: impl AsyncFnOnce() -> Result<(), ProbeError>,
    ) -> CaseOutcome {
        let started = Instant::now();
        let outcome = match case().await {
            Ok(()) => CaseOutcome::Pass,
            Err(err) => CaseOutcome::Fail(err.to_string()),
        };
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.report.record(CaseReport {
            name: CaseName::new(name),
            kind,
            outcome: outcome.clone(),
            duration_ms,
        });
        outcome
    }

    /// Returns the accumulated report.
    #[must_use]
    pub const fn report(&self) -> &SuiteReport {
        &self.report
    }

    /// Writes the report as a canonical-JSON artifact and returns its path.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when serialization or the write fails.
    pub fn write_report(&self, dir: &Path, name: &str) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(dir).map_err(|err| ReportError::Write(err.to_string()))?;
        let bytes = serde_jcs::to_vec(&self.report)
            .map_err(|err| ReportError::Serialize(err.to_string()))?;
        let path = dir.join(name);
        fs::write(&path, bytes).map_err(|err| ReportError::Write(err.to_string()))?;
        Ok(path)
    }

    /// Consumes the runner, returning the final report.
    #[must_use]
    pub fn into_report(self) -> SuiteReport {
        self.report
    }
}
