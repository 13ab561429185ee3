// crates/backstop-core/src/runtime/bundle.rs
// ============================================================================
// Module: Backstop Resource Bundle
// Description: Lookup and reading of bundled resource files.
// Purpose: Resolve (base name, extension) pairs under a bundle root.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Local probe cases assert against files shipped with the suite. A bundle
//! is a directory root; resources are addressed by base name and extension,
//! mirroring how the mobile application resolves its packaged assets.
//! Lookup distinguishes "absent" from "present but unreadable" because the
//! two fail a case with different reasons.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Bundle lookup and read failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource with the given name and extension exists in the bundle.
    #[error("resource {name}.{extension} not found in bundle")]
    NotFound {
        /// Base name of the missing resource.
        name: String,
        /// Extension of the missing resource.
        extension: String,
    },
    /// The resource exists but its bytes could not be read.
    #[error("resource {} is unreadable: {source}", .path.display())]
    Unreadable {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// SECTION: Resource Bundle
// ============================================================================

/// Directory-rooted bundle of resource files.
///
/// # Invariants
/// - Resources are flat: `root/<name>.<extension>`; no subdirectory search.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    /// Bundle root directory.
    root: PathBuf,
}

impl ResourceBundle {
    /// Creates a bundle rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Returns the bundle root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a resource to its path, or `None` when absent.
    #[must_use]
    pub fn resolve(&self, name: &str, extension: &str) -> Option<PathBuf> {
        let path = self.root.join(format!("{name}.{extension}"));
        path.is_file().then_some(path)
    }

    /// Reads a resource's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the resource is absent and
    /// [`ResourceError::Unreadable`] when reading its bytes fails.
    pub fn read(&self, name: &str, extension: &str) -> Result<Vec<u8>, ResourceError> {
        let path = self.resolve(name, extension).ok_or_else(|| ResourceError::NotFound {
            name: name.to_string(),
            extension: extension.to_string(),
        })?;
        fs::read(&path).map_err(|source| ResourceError::Unreadable {
            path,
            source,
        })
    }
}
