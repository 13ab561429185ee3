// system-tests/tests/suites/documents.rs
// ============================================================================
// Module: Documents Suite
// Description: Per-user document probes against the emulated document store.
// Purpose: Verify authorized full-document writes keyed by the session uid.
// Dependencies: system-tests helpers
// ============================================================================

//! Document-store probes for the Backstop suite.

use std::time::Duration;

use backstop_core::CaseKind;
use backstop_core::CaseOutcome;
use backstop_core::Credentials;
use backstop_core::DocumentPath;
use backstop_core::FieldMap;
use backstop_core::Session;
use backstop_core::Timestamp;
use backstop_core::UserId;
use backstop_core::UserIdentity;
use backstop_core::random_email;
use backstop_harness::SuiteRunner;
use backstop_harness::await_case;
use helpers::artifacts::report_dir;
use helpers::infra::dispatch_set_document;
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

/// Document-write expectation bound.
const DOCUMENT_TIMEOUT: Duration = Duration::from_secs(3);

/// Builds the per-user profile payload written by the document probe.
fn profile_fields(session: &Session) -> Result<FieldMap, Box<dyn std::error::Error>> {
    let mut fields = FieldMap::new();
    fields.insert("email", session.identity.email.clone())?;
    fields.insert("username", session.identity.display_name.clone().unwrap_or_default())?;
    fields.insert("user_id", session.uid().as_str())?;
    fields.insert("created_date", Timestamp::now().rfc3339()?)?;
    fields.insert("formatted_address", "568 Broadway, New York")?;
    fields.insert("phone_number", "555-673-8912")?;
    Ok(fields)
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_write_keyed_by_session_uid_succeeds() -> Result<(), Box<dyn std::error::Error>> {
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
    let fields = profile_fields(&session)?;
    let path = DocumentPath::new("users", session.uid().as_str())?;

    let outcome = runner
        .run_case("profile_document_write", CaseKind::Network, async || {
            let waiter = dispatch_set_document(
                &backend.client,
                session.clone(),
                path.clone(),
                fields.clone(),
            );
            await_case(waiter, resolve_timeout(DOCUMENT_TIMEOUT)).await?;
            Ok(())
        })
        .await;
    assert!(outcome.is_pass());

    let stored = backend
        .emulator
        .document("users", session.uid().as_str())
        .ok_or("document missing after write")?;
    assert_eq!(stored, fields);

    let dir = report_dir("documents")?;
    runner.write_report(&dir, "report.json")?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn forged_session_token_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let backend = spawn_backend()?;
    wait_for_emulator_ready(backend.emulator.base_url(), resolve_timeout(READY_TIMEOUT)).await?;

    let forged = Session {
        identity: UserIdentity {
            uid: UserId::new("intruder"),
            email: "intruder@backstop.dev".to_string(),
            display_name: None,
        },
        id_token: "forged-token".to_string(),
    };
    let mut fields = FieldMap::new();
    fields.insert("email", "intruder@backstop.dev")?;
    let path = DocumentPath::new("users", "intruder")?;

    let mut runner = SuiteRunner::new();
    let outcome = runner
        .run_case("forged_token_document_write", CaseKind::Network, async || {
            let waiter = dispatch_set_document(
                &backend.client,
                forged.clone(),
                path.clone(),
                fields.clone(),
            );
            await_case(waiter, resolve_timeout(DOCUMENT_TIMEOUT)).await?;
            Ok(())
        })
        .await;
    assert_eq!(
        outcome,
        CaseOutcome::Fail("missing or invalid authorization".to_string())
    );
    assert!(backend.emulator.document("users", "intruder").is_none());
    Ok(())
}
