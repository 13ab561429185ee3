// crates/backstop-core/src/core/hashing.rs
// ============================================================================
// Module: Backstop Hashing
// Description: Digest helper for object payloads.
// Purpose: Centralize the digest algorithm used in object metadata.
// Dependencies: sha2
// ============================================================================

//! ## Overview
//! Object uploads are acknowledged with metadata carrying a SHA-256 digest
//! of the stored bytes. Client and emulator share this helper so the digest
//! form is identical on both sides of the wire.

// ============================================================================
// SECTION: Imports
// ============================================================================

use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Digest Helpers
// ============================================================================

/// Returns the lowercase hex SHA-256 digest of the given bytes.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
