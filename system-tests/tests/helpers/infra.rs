// system-tests/tests/helpers/infra.rs
// ============================================================================
// Module: Suite Backend Harness
// Description: Helpers for spawning emulator-backed suite infrastructure.
// Purpose: Provide deterministic backend startup and dispatch glue for probes.
// Dependencies: backstop-client, backstop-config, backstop-core, backstop-emulator
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use backstop_client::PlatformClient;
use backstop_config::BackstopConfig;
use backstop_core::AuthenticationBackend;
use backstop_core::BackendError;
use backstop_core::Credentials;
use backstop_core::DocumentPath;
use backstop_core::DocumentStore;
use backstop_core::Expectation;
use backstop_core::FieldMap;
use backstop_core::MediaObject;
use backstop_core::ObjectMetadata;
use backstop_core::ObjectStore;
use backstop_core::ResourceBundle;
use backstop_core::Session;
use backstop_core::expectation;
use backstop_emulator::EmulatorConfig;
use backstop_emulator::EmulatorHandle;
use backstop_emulator::spawn_emulator;

/// Spawned backend infrastructure shared by one suite.
pub struct SuiteBackend {
    /// Emulator instance serving the platform protocol.
    pub emulator: EmulatorHandle,
    /// Client configured against the emulator endpoint.
    pub client: Arc<PlatformClient>,
    /// Bundle of suite resource fixtures.
    pub bundle: ResourceBundle,
}

/// Returns the suite fixture bundle root.
pub fn bundle_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Builds a suite configuration for the given emulator endpoint.
pub fn config_for(base_url: &str) -> Result<BackstopConfig, String> {
    let toml = format!(
        r#"[backend]
endpoint = "{base_url}"
api_key = "suite-key"
allow_insecure_http = true

[bundle]
root = "{}"
"#,
        bundle_root().display()
    );
    BackstopConfig::from_toml_str(&toml).map_err(|err| err.to_string())
}

/// Spawns an emulator and a client wired against it.
pub fn spawn_backend() -> Result<SuiteBackend, String> {
    spawn_backend_with_delay(Duration::ZERO)
}

/// Spawns an emulator holding operation responses open for `delay`.
pub fn spawn_backend_with_delay(delay: Duration) -> Result<SuiteBackend, String> {
    let emulator = spawn_emulator(EmulatorConfig {
        response_delay: delay,
    })
    .map_err(|err| err.to_string())?;
    let config = config_for(emulator.base_url())?;
    let client = PlatformClient::new(&config).map_err(|err| err.to_string())?;
    Ok(SuiteBackend {
        emulator,
        client: Arc::new(client),
        bundle: ResourceBundle::new(bundle_root()),
    })
}

/// Issues a sign-up call, returning the expectation its completion fulfills.
pub fn dispatch_sign_up(
    client: &Arc<PlatformClient>,
    credentials: Credentials,
) -> Expectation<Result<Session, BackendError>> {
    let (completion, waiter) = expectation();
    let client = Arc::clone(client);
    tokio::spawn(async move {
        completion.fulfill(client.create_user(&credentials).await);
    });
    waiter
}

/// Issues a document write, returning the expectation its completion fulfills.
pub fn dispatch_set_document(
    client: &Arc<PlatformClient>,
    session: Session,
    path: DocumentPath,
    fields: FieldMap,
) -> Expectation<Result<(), BackendError>> {
    let (completion, waiter) = expectation();
    let client = Arc::clone(client);
    tokio::spawn(async move {
        completion.fulfill(client.set_document(&session, &path, &fields).await);
    });
    waiter
}

/// Issues an object upload, returning the expectation its completion fulfills.
pub fn dispatch_put_object(
    client: &Arc<PlatformClient>,
    session: Session,
    object: MediaObject,
) -> Expectation<Result<ObjectMetadata, BackendError>> {
    let (completion, waiter) = expectation();
    let client = Arc::clone(client);
    tokio::spawn(async move {
        completion.fulfill(client.put_object(&session, &object).await);
    });
    waiter
}
