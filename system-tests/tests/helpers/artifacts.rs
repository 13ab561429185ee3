// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Artifact helpers for system-tests.
// Purpose: Create per-test run roots for suite report artifacts.
// Dependencies: system-tests
// ============================================================================

use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use system_tests::config::SystemTestConfig;

/// Returns current wall-clock milliseconds for run-root stamps.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Returns the artifact directory for the named test.
///
/// Honors the `BACKSTOP_SUITE_RUN_ROOT` override; otherwise stamps a fresh
/// run directory under `target/backstop-suite`.
pub fn report_dir(test_name: &str) -> Result<PathBuf, String> {
    let config = SystemTestConfig::load()?;
    let root = config.run_root.unwrap_or_else(|| {
        PathBuf::from("target/backstop-suite").join(format!("run_{}", now_millis()))
    });
    Ok(root.join(test_name))
}
