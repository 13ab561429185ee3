// crates/backstop-emulator/src/lib.rs
// ============================================================================
// Module: Backstop Emulator
// Description: In-process emulated backend for hermetic suite runs.
// Purpose: Serve the platform protocol over loopback with in-memory state.
// Dependencies: axum, backstop-core, tokio
// ============================================================================

//! ## Overview
//! The emulator implements the platform protocol the client speaks: account
//! sign-up with duplicate-email rejection, bearer-authorized full-document
//! writes, bearer-authorized blob uploads, and a readiness endpoint. State
//! is in-memory and dies with the handle, so suite runs are hermetic and
//! need no namespacing or teardown protocol. An injectable response delay
//! lets timeout probes hold a call open past its expectation bound.
//!
//! Security posture: all request payloads are untrusted; handlers validate
//! before touching state. See `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod server;
pub mod state;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use server::EmulatorConfig;
pub use server::EmulatorError;
pub use server::EmulatorHandle;
pub use server::spawn_emulator;
pub use state::EmulatorCore;
pub use state::SignUpRejection;
pub use state::StoredObject;
