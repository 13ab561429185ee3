// system-tests/tests/suites/reliability.rs
// ============================================================================
// Module: Reliability Suite
// Description: Timeout behavior of asynchronous probe cases.
// Purpose: Ensure hung backend calls fail their case instead of pending.
// Dependencies: system-tests helpers
// ============================================================================

//! Timeout-behavior probes for the Backstop suite.

use std::time::Duration;
use std::time::Instant;

use backstop_core::CaseKind;
use backstop_core::CaseOutcome;
use backstop_core::Credentials;
use backstop_core::random_email;
use backstop_harness::SuiteRunner;
use backstop_harness::await_case;
use helpers::infra::dispatch_sign_up;
use helpers::infra::spawn_backend_with_delay;
use helpers::readiness::wait_for_emulator_ready;
use helpers::timeouts::resolve_timeout;

use crate::helpers;

/// Emulator readiness bound; health is never delayed.
const READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay injected into every emulator operation response.
const RESPONSE_DELAY: Duration = Duration::from_secs(5);

/// Deliberately short expectation bound for the hung call.
const SHORT_TIMEOUT: Duration = Duration::from_secs(1);

#[tokio::test(flavor = "multi_thread")]
async fn hung_call_fails_its_case_with_a_timeout_reason(
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = spawn_backend_with_delay(RESPONSE_DELAY)?;
    wait_for_emulator_ready(backend.emulator.base_url(), resolve_timeout(READY_TIMEOUT)).await?;

    let mut runner = SuiteRunner::new();
    let started = Instant::now();
    let outcome = runner
        .run_case("delayed_sign_up", CaseKind::Network, async || {
            let waiter = dispatch_sign_up(
                &backend.client,
                Credentials {
                    email: random_email("backstop.dev"),
                    password: "123456".to_string(),
                },
            );
            await_case(waiter, SHORT_TIMEOUT).await?;
            Ok(())
        })
        .await;

    assert_eq!(
        outcome,
        CaseOutcome::Fail("expectation timed out after 1000 ms".to_string())
    );
    assert!(
        started.elapsed() < RESPONSE_DELAY,
        "timed-out case must conclude before the delayed response arrives"
    );

    let outcome = runner
        .run_case("suite_continues_after_timeout", CaseKind::Local, async || Ok(()))
        .await;
    assert!(outcome.is_pass());

    let report = runner.report();
    assert_eq!(report.cases.len(), 2);
    assert_eq!(report.failed(), 1);
    Ok(())
}
