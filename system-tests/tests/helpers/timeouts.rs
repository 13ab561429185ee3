// system-tests/tests/helpers/timeouts.rs
// ============================================================================
// Module: System Test Timeouts
// Description: Centralized timeout configuration with env overrides.
// Purpose: Keep suite timeouts consistent and configurable across suites.
// ============================================================================

use std::time::Duration;

use system_tests::config::SystemTestConfig;

/// Returns the effective timeout, honoring `BACKSTOP_SUITE_TIMEOUT_SEC` when
/// set. The override acts as a floor to avoid shortening explicitly longer
/// case timeouts.
#[must_use]
pub fn resolve_timeout(requested: Duration) -> Duration {
    let config = SystemTestConfig::load().unwrap_or_else(|err| {
        panic!("{err}");
    });
    config.timeout.map_or(requested, |floor| std::cmp::max(requested, floor))
}
