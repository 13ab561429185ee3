// crates/backstop-core/src/core/media.rs
// ============================================================================
// Module: Backstop Media Model
// Description: Path-addressed media objects and upload metadata.
// Purpose: Model binary blobs bound for the object store with validated paths.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The object store is path-addressed under a single root reference. Paths
//! are validated at construction: segments must be non-empty and must not be
//! `.` or `..`, so a crafted name can never escape the root. Uploads declare
//! a MIME content type and are acknowledged with [`ObjectMetadata`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Object Path
// ============================================================================

/// Validation errors for object paths.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectPathError {
    /// The path was empty.
    #[error("object path is empty")]
    Empty,
    /// A path segment was empty or a traversal component.
    #[error("invalid object path segment: {segment:?}")]
    InvalidSegment {
        /// The offending segment.
        segment: String,
    },
}

/// Slash-separated path addressing an object under the store root.
///
/// # Invariants
/// - At least one segment; every segment is non-empty and neither `.` nor `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Parses and validates an object path.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectPathError`] when the path is empty or contains an
    /// empty or traversal segment.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ObjectPathError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ObjectPathError::Empty);
        }
        for segment in raw.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(ObjectPathError::InvalidSegment {
                    segment: segment.to_string(),
                });
            }
        }
        Ok(Self(raw))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Media Objects
// ============================================================================

/// A named binary blob bound for the object store.
///
/// # Invariants
/// - `content_type` is a declared MIME type; it is metadata only and never
///   inferred from the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaObject {
    /// Destination path under the store root.
    pub path: ObjectPath,
    /// Declared MIME content type, e.g. `video/mp4`.
    pub content_type: String,
    /// Raw payload bytes.
    pub bytes: Vec<u8>,
}

/// Metadata acknowledged by the store after an upload.
///
/// # Invariants
/// - `size_bytes` equals the stored byte count.
/// - `sha256` is the lowercase hex digest of the stored bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    /// Path the object was stored at.
    pub path: ObjectPath,
    /// Content type recorded with the object.
    pub content_type: String,
    /// Stored size in bytes.
    pub size_bytes: u64,
    /// Lowercase hex SHA-256 digest of the stored bytes.
    pub sha256: String,
}
