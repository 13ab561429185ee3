// crates/backstop-core/src/core/account.rs
// ============================================================================
// Module: Backstop Account Model
// Description: Credentials, identities, and authenticated sessions.
// Purpose: Model the account records exchanged with the backend auth surface.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! Account types mirror the backend's auth surface: callers submit
//! [`Credentials`], the backend answers with a [`UserIdentity`] and an opaque
//! bearer token, and the pair travels together as a [`Session`]. The session
//! is created once per suite and passed by reference into every case that
//! writes backend state; there is no ambient global session.
//!
//! Passwords live only in the submitted credentials; nothing in Backstop
//! persists them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: Account Types
// ============================================================================

/// Email/password pair submitted to the sign-up operation.
///
/// # Invariants
/// - No validation is applied here; the backend is the authority on
///   acceptable emails and password strength.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Email address for the new account.
    pub email: String,
    /// Password for the new account.
    pub password: String,
}

/// Identity returned by the backend after a successful sign-up.
///
/// # Invariants
/// - `uid` is backend-assigned and opaque.
/// - `email` echoes the email submitted at sign-up time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Backend-assigned user identifier.
    pub uid: UserId,
    /// Email the account was created with.
    pub email: String,
    /// Optional display name; absent until the account sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Authenticated session: identity plus the bearer token authorizing writes.
///
/// # Invariants
/// - The token is opaque; Backstop forwards it verbatim in `Authorization`
///   headers and never logs it.
/// - One session is created per suite run and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identity of the signed-up user.
    pub identity: UserIdentity,
    /// Opaque bearer token minted at sign-up.
    pub id_token: String,
}

impl Session {
    /// Returns the uid of the session's user.
    #[must_use]
    pub fn uid(&self) -> &UserId {
        &self.identity.uid
    }
}
