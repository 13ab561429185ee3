// crates/backstop-core/src/lib.rs
// ============================================================================
// Module: Backstop Core Library
// Description: Data model, interfaces, and runtime primitives for Backstop.
// Purpose: Provide the shared vocabulary used by the client, emulator, and harness.
// Dependencies: serde, thiserror, tokio
// ============================================================================

//! ## Overview
//! Backstop verifies a mobile application's integration points with a hosted
//! backend platform: account sign-up, per-user document writes, and binary
//! object uploads. This crate holds the shared data model (accounts,
//! documents, media objects, probe outcomes), the backend-agnostic interface
//! traits, and the runtime primitives probes are built from (the
//! expectation/completion wait pair, random naming, bundled-resource
//! lookup).
//!
//! Security posture: backend responses and bundled resources are untrusted
//! inputs; see `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use crate::core::account::Credentials;
pub use crate::core::account::Session;
pub use crate::core::account::UserIdentity;
pub use crate::core::document::DocumentPath;
pub use crate::core::document::FieldMap;
pub use crate::core::document::FieldMapError;
pub use crate::core::hashing::sha256_hex;
pub use crate::core::identifiers::CaseName;
pub use crate::core::identifiers::UserId;
pub use crate::core::media::MediaObject;
pub use crate::core::media::ObjectMetadata;
pub use crate::core::media::ObjectPath;
pub use crate::core::media::ObjectPathError;
pub use crate::core::outcome::CaseKind;
pub use crate::core::outcome::CaseOutcome;
pub use crate::core::outcome::CaseReport;
pub use crate::core::outcome::SuiteReport;
pub use crate::core::time::Timestamp;
pub use crate::core::time::TimestampError;
pub use crate::core::wire::ERROR_EMAIL_EXISTS;
pub use crate::core::wire::ERROR_INVALID_PAYLOAD;
pub use crate::core::wire::ERROR_UNAUTHORIZED;
pub use crate::core::wire::ErrorBody;
pub use crate::core::wire::HealthResponse;
pub use crate::core::wire::SignUpRequest;
pub use crate::core::wire::SignUpResponse;
pub use crate::interfaces::AuthenticationBackend;
pub use crate::interfaces::BackendError;
pub use crate::interfaces::DocumentStore;
pub use crate::interfaces::ObjectStore;
pub use crate::runtime::bundle::ResourceBundle;
pub use crate::runtime::bundle::ResourceError;
pub use crate::runtime::expectation::Completion;
pub use crate::runtime::expectation::Expectation;
pub use crate::runtime::expectation::ExpectationError;
pub use crate::runtime::expectation::expectation;
pub use crate::runtime::naming::NAME_ALPHABET;
pub use crate::runtime::naming::NAME_LENGTH;
pub use crate::runtime::naming::random_email;
pub use crate::runtime::naming::random_name;
pub use crate::runtime::naming::random_name_with;
