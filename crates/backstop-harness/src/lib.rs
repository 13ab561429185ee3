// crates/backstop-harness/src/lib.rs
// ============================================================================
// Module: Backstop Harness
// Description: Sequential probe scheduler and suite reporting.
// Purpose: Execute probe cases in isolation and capture per-case outcomes.
// Dependencies: backstop-core, tokio, serde_jcs
// ============================================================================

//! ## Overview
//! The harness dispatches probe cases sequentially on the caller's runtime.
//! Each case runs to a terminal outcome: a failure marks exactly that case
//! and never aborts the remaining suite, and there are no retries.
//! Asynchronous cases wrap their backend call in an expectation awaited
//! under an explicit timeout, so a hung call is reported as a timeout
//! failure rather than left pending. Finished suites serialize to canonical
//! JSON report artifacts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod probe;
pub mod suite;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use probe::ProbeError;
pub use probe::await_case;
pub use probe::require_eq;
pub use probe::require_length;
pub use probe::require_resource;
pub use suite::ReportError;
pub use suite::SuiteRunner;
