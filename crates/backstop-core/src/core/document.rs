// crates/backstop-core/src/core/document.rs
// ============================================================================
// Module: Backstop Document Model
// Description: Document paths and flat field maps for the document store.
// Purpose: Enforce the flat-payload invariant at construction boundaries.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The document store holds full documents at `collection/document_id`,
//! keyed by uid for per-user profiles. Payloads are flat maps from field
//! name to scalar value; nested objects and arrays are rejected when the
//! map is built rather than at the wire, so a malformed payload never
//! leaves the process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Document Path
// ============================================================================

/// Address of a full document: `collection/document_id`.
///
/// # Invariants
/// - Both segments are non-empty and contain no `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentPath {
    /// Collection name, e.g. `users`.
    collection: String,
    /// Document identifier within the collection.
    document_id: String,
}

/// Errors raised when building document paths or field maps.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldMapError {
    /// A path segment was empty or contained a separator.
    #[error("invalid document path segment: {segment:?}")]
    InvalidSegment {
        /// The offending segment.
        segment: String,
    },
    /// A field value was a nested object or array.
    #[error("field {field:?} is not a scalar value")]
    NotScalar {
        /// Name of the offending field.
        field: String,
    },
}

impl DocumentPath {
    /// Creates a document path from collection and document id segments.
    ///
    /// # Errors
    ///
    /// Returns [`FieldMapError::InvalidSegment`] when a segment is empty or
    /// contains `/`.
    pub fn new(
        collection: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Result<Self, FieldMapError> {
        let collection = collection.into();
        let document_id = document_id.into();
        for segment in [&collection, &document_id] {
            if segment.is_empty() || segment.contains('/') {
                return Err(FieldMapError::InvalidSegment {
                    segment: segment.clone(),
                });
            }
        }
        Ok(Self {
            collection,
            document_id,
        })
    }

    /// Returns the collection segment.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the document id segment.
    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.document_id
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.document_id)
    }
}

// ============================================================================
// SECTION: Field Map
// ============================================================================

/// Flat mapping from field name to scalar JSON value.
///
/// # Invariants
/// - Values are scalars only: string, number, boolean, or null.
/// - Field order is stable (sorted) for deterministic serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, Value>);

impl FieldMap {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a scalar field, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldMapError::NotScalar`] when the value is an object or
    /// array.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), FieldMapError> {
        let field = field.into();
        let value = value.into();
        if value.is_object() || value.is_array() {
            return Err(FieldMapError::NotScalar {
                field,
            });
        }
        self.0.insert(field, value);
        Ok(())
    }

    /// Returns the value for a field when present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the map holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validates an untrusted map, accepting it only when every value is a
    /// scalar.
    ///
    /// # Errors
    ///
    /// Returns [`FieldMapError::NotScalar`] naming the first non-scalar
    /// field.
    pub fn from_untrusted(raw: BTreeMap<String, Value>) -> Result<Self, FieldMapError> {
        for (field, value) in &raw {
            if value.is_object() || value.is_array() {
                return Err(FieldMapError::NotScalar {
                    field: field.clone(),
                });
            }
        }
        Ok(Self(raw))
    }

    /// Iterates over fields in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}
