// crates/backstop-config/src/lib.rs
// ============================================================================
// Module: Backstop Configuration
// Description: Configuration model, loading guards, and validation.
// Purpose: Provide one fail-closed configuration surface for all Backstop crates.
// Dependencies: serde, toml, url, thiserror
// ============================================================================

//! ## Overview
//! Backstop configuration covers the backend endpoint, the per-operation
//! timeout tiers, and the bundled-resource root. Loading is strict: path and
//! size guards run before the file is read, the payload must be UTF-8 TOML,
//! and [`BackstopConfig::validate`] rejects insecure or degenerate values
//! rather than papering over them. Cleartext HTTP endpoints require an
//! explicit opt-in, which the suite uses only for loopback emulators.
//!
//! Security posture: configuration files are untrusted input; see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted config path length in bytes.
const MAX_CONFIG_PATH_BYTES: usize = 4_096;

/// Maximum accepted length of a single path component in bytes.
const MAX_PATH_COMPONENT_BYTES: usize = 255;

/// Maximum accepted config file size in bytes.
const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576;

/// Default sign-up timeout in seconds.
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 3;

/// Default document-write timeout in seconds.
const DEFAULT_DOCUMENT_TIMEOUT_SECS: u64 = 3;

/// Default object-upload timeout in seconds.
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages never echo the API key.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config path exceeded the maximum length.
    #[error("config path exceeds max length")]
    PathTooLong,
    /// A config path component exceeded the maximum length.
    #[error("config path component too long")]
    PathComponentTooLong,
    /// The config file exceeded the size limit.
    #[error("config file exceeds size limit")]
    FileTooLarge,
    /// The config file was not valid UTF-8.
    #[error("config file must be utf-8")]
    NotUtf8,
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Read(String),
    /// The config file was not valid TOML for the expected model.
    #[error("failed to parse config: {0}")]
    Parse(String),
    /// A validated field held an unacceptable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Per-operation timeout tiers in seconds.
///
/// # Invariants
/// - All tiers are greater than zero after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeoutConfig {
    /// Sign-up timeout in seconds.
    #[serde(default = "default_auth_timeout_secs")]
    pub auth_secs: u64,
    /// Document-write timeout in seconds.
    #[serde(default = "default_document_timeout_secs")]
    pub document_secs: u64,
    /// Object-upload timeout in seconds.
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_secs: u64,
}

/// Default for the sign-up timeout tier.
const fn default_auth_timeout_secs() -> u64 {
    DEFAULT_AUTH_TIMEOUT_SECS
}

/// Default for the document-write timeout tier.
const fn default_document_timeout_secs() -> u64 {
    DEFAULT_DOCUMENT_TIMEOUT_SECS
}

/// Default for the object-upload timeout tier.
const fn default_upload_timeout_secs() -> u64 {
    DEFAULT_UPLOAD_TIMEOUT_SECS
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            auth_secs: DEFAULT_AUTH_TIMEOUT_SECS,
            document_secs: DEFAULT_DOCUMENT_TIMEOUT_SECS,
            upload_secs: DEFAULT_UPLOAD_TIMEOUT_SECS,
        }
    }
}

impl TimeoutConfig {
    /// Returns the sign-up timeout.
    #[must_use]
    pub const fn auth(&self) -> Duration {
        Duration::from_secs(self.auth_secs)
    }

    /// Returns the document-write timeout.
    #[must_use]
    pub const fn document(&self) -> Duration {
        Duration::from_secs(self.document_secs)
    }

    /// Returns the object-upload timeout.
    #[must_use]
    pub const fn upload(&self) -> Duration {
        Duration::from_secs(self.upload_secs)
    }
}

/// Backend endpoint configuration.
///
/// # Invariants
/// - `endpoint` parses as an absolute URL.
/// - `allow_insecure_http = false` blocks cleartext `http://` endpoints.
/// - `api_key` is non-empty after validation and never logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the backend platform.
    pub endpoint: String,
    /// Project API key sent with every request.
    pub api_key: String,
    /// Allow cleartext HTTP (disabled by default; loopback emulators only).
    #[serde(default)]
    pub allow_insecure_http: bool,
    /// Per-operation timeout tiers.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

/// Bundled-resource configuration.
///
/// # Invariants
/// - `root` is non-empty after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    /// Directory holding bundled resource files.
    pub root: String,
}

/// Top-level Backstop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackstopConfig {
    /// Backend endpoint settings.
    pub backend: BackendConfig,
    /// Bundled-resource settings.
    pub bundle: BundleConfig,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl BackstopConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when path guards fail, the file cannot be
    /// read, the payload is not UTF-8 TOML, or validation rejects a value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        check_path(path)?;
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_BYTES {
            return Err(ConfigError::FileTooLarge);
        }
        let bytes = fs::read(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8)?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation rejects a value.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration, failing closed on unacceptable values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the rejected field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = Url::parse(&self.backend.endpoint)
            .map_err(|err| ConfigError::Invalid(format!("backend.endpoint: {err}")))?;
        match endpoint.scheme() {
            "https" => {}
            "http" if self.backend.allow_insecure_http => {}
            "http" => {
                return Err(ConfigError::Invalid(
                    "backend.endpoint uses http without allow_insecure_http".to_string(),
                ));
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "backend.endpoint scheme {other:?} is not supported"
                )));
            }
        }
        if self.backend.api_key.is_empty() {
            return Err(ConfigError::Invalid("backend.api_key must not be empty".to_string()));
        }
        let timeouts = &self.backend.timeouts;
        for (field, value) in [
            ("backend.timeouts.auth_secs", timeouts.auth_secs),
            ("backend.timeouts.document_secs", timeouts.document_secs),
            ("backend.timeouts.upload_secs", timeouts.upload_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{field} must be greater than zero")));
            }
        }
        if self.bundle.root.is_empty() {
            return Err(ConfigError::Invalid("bundle.root must not be empty".to_string()));
        }
        Ok(())
    }

    /// Returns the parsed endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the endpoint does not parse;
    /// unreachable after [`BackstopConfig::validate`] has accepted the value.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.backend.endpoint)
            .map_err(|err| ConfigError::Invalid(format!("backend.endpoint: {err}")))
    }
}

/// Applies path guards before any filesystem access.
fn check_path(path: &Path) -> Result<(), ConfigError> {
    let raw = path.as_os_str();
    if raw.len() > MAX_CONFIG_PATH_BYTES {
        return Err(ConfigError::PathTooLong);
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_BYTES {
            return Err(ConfigError::PathComponentTooLong);
        }
    }
    Ok(())
}
