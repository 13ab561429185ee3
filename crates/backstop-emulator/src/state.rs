// crates/backstop-emulator/src/state.rs
// ============================================================================
// Module: Emulator State
// Description: In-memory accounts, tokens, documents, and objects.
// Purpose: Hold per-instance backend state behind a transport-free API.
// Dependencies: backstop-core, rand, base64
// ============================================================================

//! ## Overview
//! [`EmulatorCore`] is the emulator with the HTTP layer peeled off: every
//! handler delegates here, and unit tests drive the same API directly.
//! Accounts are keyed by email, documents by `collection/document_id`, and
//! objects by their validated path. Uids and bearer tokens are minted with
//! fresh entropy per instance; nothing persists beyond the instance.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use backstop_core::FieldMap;
use backstop_core::ObjectMetadata;
use backstop_core::ObjectPath;
use backstop_core::SignUpResponse;
use backstop_core::UserId;
use backstop_core::sha256_hex;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use rand::distributions::Alphanumeric;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Length of minted user identifiers.
const UID_LENGTH: usize = 28;

/// Entropy bytes behind each minted bearer token.
const TOKEN_ENTROPY_BYTES: usize = 24;

/// Minimum accepted password length, matching the hosted platform.
const MIN_PASSWORD_LENGTH: usize = 6;

// ============================================================================
// SECTION: Records
// ============================================================================

/// Stored account record.
#[derive(Debug, Clone)]
struct AccountRecord {
    /// Minted user identifier.
    uid: UserId,
    /// Email the account was created with.
    email: String,
    /// Optional display name; never set at sign-up.
    display_name: Option<String>,
}

/// Stored object blob with its declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Content type declared at upload time.
    pub content_type: String,
    /// Stored bytes.
    pub bytes: Vec<u8>,
}

/// Reasons a sign-up request is refused.
///
/// # Invariants
/// - Variants are stable; the HTTP layer maps them onto wire messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpRejection {
    /// The email is already registered.
    EmailExists,
    /// The email or password failed validation.
    InvalidPayload,
}

// ============================================================================
// SECTION: Core State
// ============================================================================

/// Transport-free emulator state.
///
/// # Invariants
/// - One account per email; sign-up never overwrites.
/// - Tokens authorize exactly the uid they were minted for.
#[derive(Debug, Default)]
pub struct EmulatorCore {
    /// Accounts keyed by email.
    accounts: HashMap<String, AccountRecord>,
    /// Bearer tokens keyed by token value.
    tokens: HashMap<String, UserId>,
    /// Documents keyed by `collection/document_id`.
    documents: HashMap<String, FieldMap>,
    /// Objects keyed by validated path.
    objects: HashMap<String, StoredObject>,
}

impl EmulatorCore {
    /// Creates empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account and mints its session token.
    ///
    /// # Errors
    ///
    /// Returns [`SignUpRejection::InvalidPayload`] for malformed credentials
    /// and [`SignUpRejection::EmailExists`] for duplicate emails.
    pub fn sign_up(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<SignUpResponse, SignUpRejection> {
        if !is_plausible_email(email) || password.len() < MIN_PASSWORD_LENGTH {
            return Err(SignUpRejection::InvalidPayload);
        }
        if self.accounts.contains_key(email) {
            return Err(SignUpRejection::EmailExists);
        }
        let record = AccountRecord {
            uid: mint_uid(),
            email: email.to_string(),
            display_name: None,
        };
        let token = mint_token();
        self.tokens.insert(token.clone(), record.uid.clone());
        let response = SignUpResponse {
            uid: record.uid.clone(),
            email: record.email.clone(),
            display_name: record.display_name.clone(),
            id_token: token,
        };
        self.accounts.insert(record.email.clone(), record);
        Ok(response)
    }

    /// Resolves a bearer token to the uid it authorizes.
    #[must_use]
    pub fn authorize(&self, token: &str) -> Option<&UserId> {
        self.tokens.get(token)
    }

    /// Sets the full document at `collection/document_id`, overwriting any
    /// existing value.
    pub fn set_document(&mut self, collection: &str, document_id: &str, fields: FieldMap) {
        self.documents.insert(format!("{collection}/{document_id}"), fields);
    }

    /// Returns a stored document, if present.
    #[must_use]
    pub fn document(&self, collection: &str, document_id: &str) -> Option<&FieldMap> {
        self.documents.get(&format!("{collection}/{document_id}"))
    }

    /// Stores an object blob and returns its metadata.
    pub fn put_object(
        &mut self,
        path: &ObjectPath,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ObjectMetadata {
        let metadata = ObjectMetadata {
            path: path.clone(),
            content_type: content_type.to_string(),
            size_bytes: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            sha256: sha256_hex(&bytes),
        };
        self.objects.insert(
            path.as_str().to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        metadata
    }

    /// Returns a stored object, if present.
    #[must_use]
    pub fn object(&self, path: &str) -> Option<&StoredObject> {
        self.objects.get(path)
    }

    /// Returns the number of registered accounts.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

// ============================================================================
// SECTION: Minting Helpers
// ============================================================================

/// Accepts emails with exactly one `@` separating non-empty halves.
fn is_plausible_email(email: &str) -> bool {
    let mut halves = email.split('@');
    match (halves.next(), halves.next(), halves.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

/// Mints a fresh alphanumeric uid.
fn mint_uid() -> UserId {
    let raw: String =
        rand::thread_rng().sample_iter(&Alphanumeric).take(UID_LENGTH).map(char::from).collect();
    UserId::new(raw)
}

/// Mints a fresh opaque bearer token.
fn mint_token() -> String {
    let mut entropy = [0_u8; TOKEN_ENTROPY_BYTES];
    rand::thread_rng().fill(&mut entropy);
    URL_SAFE_NO_PAD.encode(entropy)
}
