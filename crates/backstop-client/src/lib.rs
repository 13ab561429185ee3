// crates/backstop-client/src/lib.rs
// ============================================================================
// Module: Backstop Client
// Description: HTTP client for the backend platform protocol.
// Purpose: Implement the backend interfaces over reqwest with strict policy.
// Dependencies: backstop-core, backstop-config, reqwest
// ============================================================================

//! ## Overview
//! This crate implements the Backstop backend interfaces against the
//! platform's JSON-over-HTTP protocol. The client issues exactly one request
//! per operation, never follows redirects, never retries, and maps every
//! non-success response onto the stable [`backstop_core::BackendError`]
//! variants. Endpoint policy is enforced at construction: cleartext HTTP
//! requires the configuration's explicit opt-in, and endpoints carrying
//! embedded credentials are rejected outright.
//!
//! Security posture: backend responses are untrusted; see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::PlatformClient;

#[cfg(test)]
mod tests;
