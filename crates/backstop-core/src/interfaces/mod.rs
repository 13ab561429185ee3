// crates/backstop-core/src/interfaces/mod.rs
// ============================================================================
// Module: Backstop Interfaces
// Description: Backend-agnostic interfaces for auth, documents, and objects.
// Purpose: Define the contract surfaces probes exercise against any backend.
// Dependencies: async-trait, thiserror, crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Backstop talks to a backend platform without
//! embedding transport details. The HTTP client implements them against the
//! platform wire protocol; the emulator serves the same protocol in-process.
//! Implementations issue exactly one backend call per invocation, never
//! retry, and fail closed on malformed responses.
//!
//! Security posture: backend responses are untrusted inputs; see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

use crate::core::account::Credentials;
use crate::core::account::Session;
use crate::core::document::DocumentPath;
use crate::core::document::FieldMap;
use crate::core::media::MediaObject;
use crate::core::media::ObjectMetadata;

// ============================================================================
// SECTION: Backend Errors
// ============================================================================

/// Backend operation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages never carry passwords or bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Sign-up was rejected because the email is already registered.
    #[error("email already exists")]
    EmailExists,
    /// The operation lacked a valid bearer token.
    #[error("missing or invalid authorization")]
    Unauthorized,
    /// The backend rejected the request with the given message.
    #[error("backend rejected request: {0}")]
    Rejected(String),
    /// The request never produced a backend verdict.
    #[error("transport failure: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Authentication Backend
// ============================================================================

/// Account sign-up surface of the backend platform.
#[async_trait]
pub trait AuthenticationBackend: Send + Sync {
    /// Creates a user with email/password credentials and returns the
    /// authenticated session.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::EmailExists`] for duplicate emails,
    /// [`BackendError::Rejected`] for malformed credentials, and
    /// [`BackendError::Transport`] when no verdict was received.
    async fn create_user(&self, credentials: &Credentials) -> Result<Session, BackendError>;
}

// ============================================================================
// SECTION: Document Store
// ============================================================================

/// Full-document write surface of the document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Sets the full document at `path`, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unauthorized`] when the session token is not
    /// accepted, [`BackendError::Rejected`] when the payload is refused, and
    /// [`BackendError::Transport`] when no verdict was received.
    async fn set_document(
        &self,
        session: &Session,
        path: &DocumentPath,
        fields: &FieldMap,
    ) -> Result<(), BackendError>;
}

// ============================================================================
// SECTION: Object Store
// ============================================================================

/// Path-addressed blob upload surface of the object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads the object's bytes with its declared content type and returns
    /// the stored metadata.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unauthorized`] when the session token is not
    /// accepted, [`BackendError::Rejected`] when the upload is refused, and
    /// [`BackendError::Transport`] when no verdict was received.
    async fn put_object(
        &self,
        session: &Session,
        object: &MediaObject,
    ) -> Result<ObjectMetadata, BackendError>;
}
