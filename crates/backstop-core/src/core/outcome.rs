// crates/backstop-core/src/core/outcome.rs
// ============================================================================
// Module: Backstop Outcome Model
// Description: Probe case descriptors and pass/fail report records.
// Purpose: Provide stable report shapes for suite artifacts.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! Every probe case ends in exactly one outcome: pass, or fail with a
//! human-readable reason. Reports are data only; the harness owns scheduling
//! and the artifact writer owns persistence. A failed case never aborts the
//! remaining suite, so [`SuiteReport`] always carries one record per case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CaseName;

// ============================================================================
// SECTION: Case Descriptors
// ============================================================================

/// Classification of a probe case.
///
/// # Invariants
/// - Variants are stable for report labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    /// Local bundled-resource assertion; completes synchronously.
    Local,
    /// One network round-trip awaited under a fixed timeout.
    Network,
}

// ============================================================================
// SECTION: Outcome Records
// ============================================================================

/// Terminal outcome of a single probe case.
///
/// # Invariants
/// - `Fail` reasons are human-readable and safe to persist; they never carry
///   credentials or tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// The case's assertions all held.
    Pass,
    /// The case failed with the given reason.
    Fail(String),
}

impl CaseOutcome {
    /// Returns true when the outcome is a pass.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Report record for one executed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Name of the case.
    pub name: CaseName,
    /// Classification of the case.
    pub kind: CaseKind,
    /// Terminal outcome.
    pub outcome: CaseOutcome,
    /// Wall-clock duration of the case in milliseconds.
    pub duration_ms: u64,
}

/// Aggregated report for a full suite run.
///
/// # Invariants
/// - Holds exactly one record per executed case, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Per-case records in execution order.
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a case record.
    pub fn record(&mut self, report: CaseReport) {
        self.cases.push(report);
    }

    /// Returns the number of failed cases.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.cases.iter().filter(|case| !case.outcome.is_pass()).count()
    }

    /// Returns true when every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}
