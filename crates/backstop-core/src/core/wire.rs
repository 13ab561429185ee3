// crates/backstop-core/src/core/wire.rs
// ============================================================================
// Module: Backstop Wire Protocol
// Description: JSON request/response forms shared by client and emulator.
// Purpose: Keep both sides of the platform protocol on one set of shapes.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! The platform protocol is JSON over HTTP with camelCase member names:
//! `POST /v1/accounts:signUp` creates an account, `PUT
//! /v1/documents/{collection}/{document_id}` sets a full document, `POST
//! /v1/objects/{path}` stores a blob, and `GET /v1/health` answers readiness
//! probes. Error responses wrap a stable machine-readable message. The HTTP
//! client serializes these shapes; the emulator deserializes the same ones,
//! so protocol drift shows up as a type error rather than a flaky probe.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: Error Messages
// ============================================================================

/// Stable error message for duplicate sign-up emails.
pub const ERROR_EMAIL_EXISTS: &str = "EMAIL_EXISTS";

/// Stable error message for missing or invalid bearer tokens.
pub const ERROR_UNAUTHORIZED: &str = "UNAUTHORIZED";

/// Stable error message for malformed request payloads.
pub const ERROR_INVALID_PAYLOAD: &str = "INVALID_PAYLOAD";

// ============================================================================
// SECTION: Account Surface
// ============================================================================

/// Request body for `POST /v1/accounts:signUp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignUpRequest {
    /// Email address for the new account.
    pub email: String,
    /// Password for the new account.
    pub password: String,
}

/// Response body for a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    /// Backend-assigned user identifier.
    pub uid: UserId,
    /// Email the account was created with.
    pub email: String,
    /// Optional display name; absent for fresh accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Opaque bearer token authorizing subsequent writes.
    pub id_token: String,
}

// ============================================================================
// SECTION: Error Surface
// ============================================================================

/// Detail member of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    /// Stable machine-readable message.
    pub message: String,
}

/// Error envelope returned with every non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Error detail.
    pub error: ErrorDetail,
}

impl ErrorBody {
    /// Builds an error envelope with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
            },
        }
    }
}

// ============================================================================
// SECTION: Health Surface
// ============================================================================

/// Response body for `GET /v1/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok` while the emulator is serving.
    pub status: String,
}
