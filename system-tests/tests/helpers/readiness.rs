// system-tests/tests/helpers/readiness.rs
// ============================================================================
// Module: Readiness Helpers
// Description: Readiness probes for emulator instances.
// Purpose: Ensure emulators are serving without arbitrary sleeps.
// Dependencies: reqwest, tokio
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use tokio::time::sleep;

/// Polls the health route until the emulator responds or timeout expires.
pub async fn wait_for_emulator_ready(base_url: &str, timeout: Duration) -> Result<(), String> {
    let client = reqwest::Client::new();
    let health_url = format!("{base_url}/v1/health");
    let start = Instant::now();
    let mut attempts = 0_u32;
    loop {
        attempts = attempts.saturating_add(1);
        match client.get(&health_url).send().await {
            Ok(response) if response.status().is_success() => return Ok(()),
            Ok(response) => {
                if start.elapsed() > timeout {
                    return Err(format!(
                        "emulator readiness timeout after {attempts} attempts: status {}",
                        response.status()
                    ));
                }
                sleep(Duration::from_millis(50)).await;
            }
            Err(err) => {
                if start.elapsed() > timeout {
                    return Err(format!(
                        "emulator readiness timeout after {attempts} attempts: {err}"
                    ));
                }
                sleep(Duration::from_millis(50)).await;
            }
        }
    }
}
