// system-tests/tests/suites/storage.rs
// ============================================================================
// Module: Storage Suite
// Description: Blob upload probes against the emulated object store.
// Purpose: Verify bounded uploads with declared content types and metadata.
// Dependencies: system-tests helpers
// ============================================================================

//! Object-store probes for the Backstop suite.

use std::time::Duration;

use backstop_core::CaseKind;
use backstop_core::CaseOutcome;
use backstop_core::Credentials;
use backstop_core::MediaObject;
use backstop_core::ObjectPath;
use backstop_core::Session;
use backstop_core::random_email;
use backstop_core::sha256_hex;
use backstop_harness::SuiteRunner;
use backstop_harness::await_case;
use backstop_harness::require_eq;
use helpers::artifacts::report_dir;
use helpers::infra::dispatch_put_object;
use helpers::infra::dispatch_sign_up;
use helpers::infra::spawn_backend;
use helpers::readiness::wait_for_emulator_ready;
use helpers::timeouts::resolve_timeout;

use crate::helpers;

/// Fixed password used by every sign-up probe.
const PASSWORD: &str = "123456";

/// Emulator readiness bound.
const READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Sign-up expectation bound.
const AUTH_TIMEOUT: Duration = Duration::from_secs(3);

/// Upload expectation bound.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::test(flavor = "multi_thread")]
async fn video_upload_completes_within_bound() -> Result<(), Box<dyn std::error::Error>> {
    let backend = spawn_backend()?;
    wait_for_emulator_ready(backend.emulator.base_url(), resolve_timeout(READY_TIMEOUT)).await?;

    let mut runner = SuiteRunner::new();
    let mut session: Option<Session> = None;

    let outcome = runner
        .run_case("suite_session_sign_up", CaseKind::Network, async || {
            let waiter = dispatch_sign_up(
                &backend.client,
                Credentials {
                    email: random_email("backstop.dev"),
                    password: PASSWORD.to_string(),
                },
            );
            session = Some(await_case(waiter, resolve_timeout(AUTH_TIMEOUT)).await?);
            Ok(())
        })
        .await;
    assert!(outcome.is_pass());

    let session = session.ok_or("sign-up case did not produce a session")?;
    let video_bytes = backend.bundle.read("skyline", "mp4")?;
    let video_len = video_bytes.len();
    let path = ObjectPath::parse("videos/skyline")?;
    let object = MediaObject {
        path: path.clone(),
        content_type: "video/mp4".to_string(),
        bytes: video_bytes.clone(),
    };

    let outcome = runner
        .run_case("video_upload", CaseKind::Network, async || {
            let waiter = dispatch_put_object(&backend.client, session.clone(), object.clone());
            let metadata = await_case(waiter, resolve_timeout(UPLOAD_TIMEOUT)).await?;
            require_eq(&u64::try_from(video_len).unwrap_or(u64::MAX), &metadata.size_bytes)?;
            require_eq(&sha256_hex(&video_bytes), &metadata.sha256)?;
            require_eq(&"video/mp4".to_string(), &metadata.content_type)?;
            Ok(())
        })
        .await;
    assert!(outcome.is_pass());

    let stored = backend.emulator.object("videos/skyline").ok_or("object missing after upload")?;
    assert_eq!(stored.content_type, "video/mp4");
    assert_eq!(stored.bytes, video_bytes);

    let dir = report_dir("storage")?;
    runner.write_report(&dir, "report.json")?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn absent_video_resource_fails_before_any_upload(
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = spawn_backend()?;
    wait_for_emulator_ready(backend.emulator.base_url(), resolve_timeout(READY_TIMEOUT)).await?;

    let mut runner = SuiteRunner::new();
    let outcome = runner
        .run_case("missing_video_resource", CaseKind::Local, async || {
            backend.bundle.read("glacier", "mp4").map_err(backstop_harness::ProbeError::from)?;
            Ok(())
        })
        .await;
    assert_eq!(
        outcome,
        CaseOutcome::Fail("resource glacier.mp4 not found in bundle".to_string())
    );
    assert!(backend.emulator.object("videos/glacier").is_none());
    Ok(())
}
