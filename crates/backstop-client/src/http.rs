// crates/backstop-client/src/http.rs
// ============================================================================
// Module: Platform HTTP Client
// Description: reqwest-backed implementation of the backend interfaces.
// Purpose: Speak the platform protocol with per-operation timeout tiers.
// Dependencies: backstop-core, backstop-config, reqwest, serde_json
// ============================================================================

//! ## Overview
//! One client instance serves a whole suite run. Each operation issues a
//! single bounded request: sign-up under the auth tier, document writes
//! under the document tier, object uploads under the upload tier. Redirects
//! are never followed and failures are never retried; the harness decides
//! what a failure means for the owning case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use backstop_config::BackstopConfig;
use backstop_config::ConfigError;
use backstop_config::TimeoutConfig;
use backstop_core::AuthenticationBackend;
use backstop_core::BackendError;
use backstop_core::Credentials;
use backstop_core::DocumentPath;
use backstop_core::DocumentStore;
use backstop_core::ERROR_EMAIL_EXISTS;
use backstop_core::ErrorBody;
use backstop_core::FieldMap;
use backstop_core::MediaObject;
use backstop_core::ObjectMetadata;
use backstop_core::ObjectStore;
use backstop_core::Session;
use backstop_core::SignUpRequest;
use backstop_core::SignUpResponse;
use backstop_core::UserIdentity;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// User agent sent with every request.
const USER_AGENT: &str = "backstop/0.1";

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP client for the backend platform protocol.
///
/// # Invariants
/// - Redirects are not followed.
/// - Every operation carries exactly one request with a per-tier timeout.
/// - The API key travels as a query parameter and is never logged.
pub struct PlatformClient {
    /// Underlying HTTP client.
    client: Client,
    /// Validated base endpoint.
    base: Url,
    /// Project API key appended to every request.
    api_key: String,
    /// Per-operation timeout tiers.
    timeouts: TimeoutConfig,
}

impl PlatformClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the endpoint scheme violates
    /// policy, carries embedded credentials, or cannot hold path segments.
    pub fn new(config: &BackstopConfig) -> Result<Self, ConfigError> {
        let base = config.endpoint_url()?;
        match base.scheme() {
            "https" => {}
            "http" if config.backend.allow_insecure_http => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "endpoint scheme {other:?} violates policy"
                )));
            }
        }
        if !base.username().is_empty() || base.password().is_some() {
            return Err(ConfigError::Invalid(
                "endpoint credentials are not allowed".to_string(),
            ));
        }
        if base.cannot_be_a_base() {
            return Err(ConfigError::Invalid(
                "endpoint cannot hold path segments".to_string(),
            ));
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()
            .map_err(|_| ConfigError::Invalid("http client build failed".to_string()))?;
        Ok(Self {
            client,
            base,
            api_key: config.backend.api_key.clone(),
            timeouts: config.backend.timeouts,
        })
    }

    /// Builds an operation URL from path segments, appending the API key.
    pub(crate) fn operation_url(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base.clone();
        {
            let mut parts = url
                .path_segments_mut()
                .map_err(|()| BackendError::Rejected("endpoint cannot hold paths".to_string()))?;
            parts.pop_if_empty();
            parts.extend(segments);
        }
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

// ============================================================================
// SECTION: Error Mapping
// ============================================================================

/// Maps a non-success response onto the stable backend error taxonomy.
pub(crate) fn map_error(status: StatusCode, body: Option<ErrorBody>) -> BackendError {
    let message = body.map(|body| body.error.message);
    if status == StatusCode::CONFLICT
        || message.as_deref() == Some(ERROR_EMAIL_EXISTS)
    {
        return BackendError::EmailExists;
    }
    if status == StatusCode::UNAUTHORIZED {
        return BackendError::Unauthorized;
    }
    BackendError::Rejected(message.unwrap_or_else(|| format!("status {}", status.as_u16())))
}

/// Maps transport-level failures without echoing the request URL.
fn map_transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.without_url().to_string())
}

/// Reads the error envelope from a non-success response, if one is present.
async fn error_body(response: reqwest::Response) -> Option<ErrorBody> {
    response.json::<ErrorBody>().await.ok()
}

// ============================================================================
// SECTION: Interface Implementations
// ============================================================================

#[async_trait]
impl AuthenticationBackend for PlatformClient {
    async fn create_user(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        let url = self.operation_url(&["v1", "accounts:signUp"])?;
        let request = SignUpRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        };
        let response = self
            .client
            .post(url)
            .timeout(self.timeouts.auth())
            .json(&request)
            .send()
            .await
            .map_err(map_transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_error(status, error_body(response).await));
        }
        let body: SignUpResponse = response
            .json()
            .await
            .map_err(|_| BackendError::Rejected("malformed sign-up response".to_string()))?;
        Ok(Session {
            identity: UserIdentity {
                uid: body.uid,
                email: body.email,
                display_name: body.display_name,
            },
            id_token: body.id_token,
        })
    }
}

#[async_trait]
impl DocumentStore for PlatformClient {
    async fn set_document(
        &self,
        session: &Session,
        path: &DocumentPath,
        fields: &FieldMap,
    ) -> Result<(), BackendError> {
        let url =
            self.operation_url(&["v1", "documents", path.collection(), path.document_id()])?;
        let response = self
            .client
            .put(url)
            .timeout(self.timeouts.document())
            .header(AUTHORIZATION, format!("Bearer {}", session.id_token))
            .json(fields)
            .send()
            .await
            .map_err(map_transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_error(status, error_body(response).await));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for PlatformClient {
    async fn put_object(
        &self,
        session: &Session,
        object: &MediaObject,
    ) -> Result<ObjectMetadata, BackendError> {
        let mut segments = vec!["v1", "objects"];
        segments.extend(object.path.as_str().split('/'));
        let url = self.operation_url(&segments)?;
        let response = self
            .client
            .post(url)
            .timeout(self.timeouts.upload())
            .header(AUTHORIZATION, format!("Bearer {}", session.id_token))
            .header(CONTENT_TYPE, object.content_type.clone())
            .body(object.bytes.clone())
            .send()
            .await
            .map_err(map_transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_error(status, error_body(response).await));
        }
        response
            .json()
            .await
            .map_err(|_| BackendError::Rejected("malformed upload response".to_string()))
    }
}
