// crates/backstop-emulator/src/server.rs
// ============================================================================
// Module: Emulator Server
// Description: Loopback HTTP surface over the in-memory emulator state.
// Purpose: Spawn and tear down protocol-faithful emulator instances.
// Dependencies: axum, tokio, backstop-core
// ============================================================================

//! ## Overview
//! Each emulator instance binds an ephemeral loopback port, serves on a
//! dedicated thread with its own current-thread runtime, and shuts down
//! when its handle drops. The optional response delay runs before an
//! operation handler touches state, holding the call open so timeout probes
//! can observe an expectation elapsing; the health route is never delayed,
//! so readiness polling stays usable on a delayed instance.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use backstop_core::ERROR_EMAIL_EXISTS;
use backstop_core::ERROR_INVALID_PAYLOAD;
use backstop_core::ERROR_UNAUTHORIZED;
use backstop_core::ErrorBody;
use backstop_core::FieldMap;
use backstop_core::HealthResponse;
use backstop_core::ObjectPath;
use backstop_core::SignUpRequest;
use backstop_core::UserId;
use serde_json::Value;
use thiserror::Error;
use tokio::runtime::Builder;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::state::EmulatorCore;
use crate::state::SignUpRejection;
use crate::state::StoredObject;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Emulator instance configuration.
///
/// # Invariants
/// - `response_delay` applies to operation handlers only, never to health.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmulatorConfig {
    /// Delay injected before each operation handler runs.
    pub response_delay: Duration,
}

/// Emulator spawn errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// Binding the loopback listener failed.
    #[error("emulator bind failed: {0}")]
    Bind(String),
    /// Preparing the bound listener failed.
    #[error("emulator listener setup failed: {0}")]
    Listener(String),
}

// ============================================================================
// SECTION: Server State
// ============================================================================

/// Shared state handed to every handler.
#[derive(Clone)]
struct ServerState {
    /// In-memory backend state.
    core: Arc<Mutex<EmulatorCore>>,
    /// Delay injected before operation handlers run.
    response_delay: Duration,
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle for a spawned emulator instance.
pub struct EmulatorHandle {
    /// Base URL of the instance, e.g. `http://127.0.0.1:49152`.
    base_url: String,
    /// Shared state, kept for post-hoc inspection in tests.
    core: Arc<Mutex<EmulatorCore>>,
    /// Graceful-shutdown trigger.
    shutdown: Option<oneshot::Sender<()>>,
    /// Server thread join handle.
    join: Option<thread::JoinHandle<()>>,
}

impl EmulatorHandle {
    /// Returns the instance base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a stored document, if present.
    #[must_use]
    pub fn document(&self, collection: &str, document_id: &str) -> Option<FieldMap> {
        self.core
            .lock()
            .ok()
            .and_then(|core| core.document(collection, document_id).cloned())
    }

    /// Returns a stored object, if present.
    #[must_use]
    pub fn object(&self, path: &str) -> Option<StoredObject> {
        self.core.lock().ok().and_then(|core| core.object(path).cloned())
    }

    /// Returns the number of registered accounts.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.core.lock().map_or(0, |core| core.account_count())
    }
}

impl Drop for EmulatorHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

// ============================================================================
// SECTION: Spawn
// ============================================================================

/// Spawns an emulator instance on an ephemeral loopback port.
///
/// # Errors
///
/// Returns [`EmulatorError`] when the listener cannot be bound or prepared.
pub fn spawn_emulator(config: EmulatorConfig) -> Result<EmulatorHandle, EmulatorError> {
    let listener =
        StdTcpListener::bind("127.0.0.1:0").map_err(|err| EmulatorError::Bind(err.to_string()))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| EmulatorError::Listener(err.to_string()))?;
    let addr = listener.local_addr().map_err(|err| EmulatorError::Listener(err.to_string()))?;
    let base_url = format!("http://{addr}");

    let core = Arc::new(Mutex::new(EmulatorCore::new()));
    let state = ServerState {
        core: Arc::clone(&core),
        response_delay: config.response_delay,
    };
    let app = Router::new()
        .route("/v1/accounts:signUp", post(handle_sign_up))
        .route("/v1/documents/{collection}/{document_id}", put(handle_set_document))
        .route("/v1/objects/{*path}", post(handle_put_object))
        .route("/v1/health", get(handle_health))
        .with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let runtime = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(error) => {
                let _ = error;
                return;
            }
        };
        runtime.block_on(async move {
            let listener = match tokio::net::TcpListener::from_std(listener) {
                Ok(listener) => listener,
                Err(error) => {
                    let _ = error;
                    return;
                }
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });

    Ok(EmulatorHandle {
        base_url,
        core,
        shutdown: Some(shutdown_tx),
        join: Some(join),
    })
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Builds an error response with the given status and wire message.
fn error_response(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(ErrorBody::new(message))).into_response()
}

/// Resolves the bearer token from request headers.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(ToString::to_string)
}

/// Authorizes a request, resolving its token to a uid.
fn authorize(state: &ServerState, headers: &HeaderMap) -> Result<UserId, Response> {
    let token = bearer_token(headers)
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, ERROR_UNAUTHORIZED))?;
    let core = state
        .core
        .lock()
        .map_err(|_| error_response(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"))?;
    core.authorize(&token)
        .cloned()
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, ERROR_UNAUTHORIZED))
}

/// Handles `POST /v1/accounts:signUp`.
async fn handle_sign_up(State(state): State<ServerState>, bytes: Bytes) -> Response {
    if state.response_delay > Duration::ZERO {
        sleep(state.response_delay).await;
    }
    let Ok(request) = serde_json::from_slice::<SignUpRequest>(bytes.as_ref()) else {
        return error_response(StatusCode::BAD_REQUEST, ERROR_INVALID_PAYLOAD);
    };
    let Ok(mut core) = state.core.lock() else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL");
    };
    match core.sign_up(&request.email, &request.password) {
        Ok(response) => (StatusCode::CREATED, axum::Json(response)).into_response(),
        Err(SignUpRejection::EmailExists) => {
            error_response(StatusCode::CONFLICT, ERROR_EMAIL_EXISTS)
        }
        Err(SignUpRejection::InvalidPayload) => {
            error_response(StatusCode::BAD_REQUEST, ERROR_INVALID_PAYLOAD)
        }
    }
}

/// Handles `PUT /v1/documents/{collection}/{document_id}`.
async fn handle_set_document(
    State(state): State<ServerState>,
    Path((collection, document_id)): Path<(String, String)>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    if state.response_delay > Duration::ZERO {
        sleep(state.response_delay).await;
    }
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let Ok(raw) = serde_json::from_slice::<BTreeMap<String, Value>>(bytes.as_ref()) else {
        return error_response(StatusCode::BAD_REQUEST, ERROR_INVALID_PAYLOAD);
    };
    let Ok(fields) = FieldMap::from_untrusted(raw) else {
        return error_response(StatusCode::BAD_REQUEST, ERROR_INVALID_PAYLOAD);
    };
    let Ok(mut core) = state.core.lock() else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL");
    };
    core.set_document(&collection, &document_id, fields);
    StatusCode::NO_CONTENT.into_response()
}

/// Handles `POST /v1/objects/{*path}`.
async fn handle_put_object(
    State(state): State<ServerState>,
    Path(path): Path<String>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    if state.response_delay > Duration::ZERO {
        sleep(state.response_delay).await;
    }
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
    else {
        return error_response(StatusCode::BAD_REQUEST, ERROR_INVALID_PAYLOAD);
    };
    let Ok(object_path) = ObjectPath::parse(path) else {
        return error_response(StatusCode::BAD_REQUEST, ERROR_INVALID_PAYLOAD);
    };
    let Ok(mut core) = state.core.lock() else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL");
    };
    let metadata = core.put_object(&object_path, content_type, bytes.to_vec());
    (StatusCode::CREATED, axum::Json(metadata)).into_response()
}

/// Handles `GET /v1/health`.
async fn handle_health() -> Response {
    axum::Json(HealthResponse {
        status: "ok".to_string(),
    })
    .into_response()
}
