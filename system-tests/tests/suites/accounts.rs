// system-tests/tests/suites/accounts.rs
// ============================================================================
// Module: Accounts Suite
// Description: Sign-up probes against the emulated auth surface.
// Purpose: Verify identity echo, duplicate rejection, and payload screening.
// Dependencies: system-tests helpers
// ============================================================================

//! Account sign-up probes for the Backstop suite.

use std::time::Duration;

use backstop_core::CaseKind;
use backstop_core::CaseOutcome;
use backstop_core::Credentials;
use backstop_core::Session;
use backstop_core::random_email;
use backstop_harness::SuiteRunner;
use backstop_harness::await_case;
use backstop_harness::require_eq;
use helpers::artifacts::report_dir;
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

#[tokio::test(flavor = "multi_thread")]
async fn fresh_email_sign_up_echoes_submitted_email() -> Result<(), Box<dyn std::error::Error>> {
    let backend = spawn_backend()?;
    wait_for_emulator_ready(backend.emulator.base_url(), resolve_timeout(READY_TIMEOUT)).await?;

    let mut runner = SuiteRunner::new();
    let email = random_email("backstop.dev");
    let mut session: Option<Session> = None;

    let outcome = runner
        .run_case("fresh_email_sign_up", CaseKind::Network, async || {
            let waiter = dispatch_sign_up(
                &backend.client,
                Credentials {
                    email: email.clone(),
                    password: PASSWORD.to_string(),
                },
            );
            let signed_up = await_case(waiter, resolve_timeout(AUTH_TIMEOUT)).await?;
            require_eq(&email.as_str(), &signed_up.identity.email.as_str())?;
            session = Some(signed_up);
            Ok(())
        })
        .await;
    assert!(outcome.is_pass());

    let session = session.ok_or("sign-up case did not produce a session")?;
    assert!(!session.uid().as_str().is_empty());
    assert!(!session.id_token.is_empty());
    assert_eq!(backend.emulator.account_count(), 1);

    let dir = report_dir("accounts")?;
    runner.write_report(&dir, "report.json")?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_sign_up_fails_the_case() -> Result<(), Box<dyn std::error::Error>> {
    let backend = spawn_backend()?;
    wait_for_emulator_ready(backend.emulator.base_url(), resolve_timeout(READY_TIMEOUT)).await?;

    let mut runner = SuiteRunner::new();
    let email = random_email("backstop.dev");
    let credentials = Credentials {
        email: email.clone(),
        password: PASSWORD.to_string(),
    };

    let outcome = runner
        .run_case("first_sign_up", CaseKind::Network, async || {
            let waiter = dispatch_sign_up(&backend.client, credentials.clone());
            await_case(waiter, resolve_timeout(AUTH_TIMEOUT)).await?;
            Ok(())
        })
        .await;
    assert!(outcome.is_pass());

    let outcome = runner
        .run_case("duplicate_sign_up", CaseKind::Network, async || {
            let waiter = dispatch_sign_up(&backend.client, credentials.clone());
            await_case(waiter, resolve_timeout(AUTH_TIMEOUT)).await?;
            Ok(())
        })
        .await;
    assert_eq!(outcome, CaseOutcome::Fail("email already exists".to_string()));

    assert_eq!(backend.emulator.account_count(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_credentials_fail_the_case() -> Result<(), Box<dyn std::error::Error>> {
    let backend = spawn_backend()?;
    wait_for_emulator_ready(backend.emulator.base_url(), resolve_timeout(READY_TIMEOUT)).await?;

    let mut runner = SuiteRunner::new();
    let outcome = runner
        .run_case("short_password_sign_up", CaseKind::Network, async || {
            let waiter = dispatch_sign_up(
                &backend.client,
                Credentials {
                    email: random_email("backstop.dev"),
                    password: "123".to_string(),
                },
            );
            await_case(waiter, resolve_timeout(AUTH_TIMEOUT)).await?;
            Ok(())
        })
        .await;
    assert_eq!(
        outcome,
        CaseOutcome::Fail("backend rejected request: INVALID_PAYLOAD".to_string())
    );
    assert_eq!(backend.emulator.account_count(), 0);
    Ok(())
}
