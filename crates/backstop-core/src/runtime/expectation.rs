// crates/backstop-core/src/runtime/expectation.rs
// ============================================================================
// Module: Backstop Expectation Primitive
// Description: Exactly-once completion signaling with a bounded await.
// Purpose: Re-express callback-style backend APIs as explicit completions.
// Dependencies: tokio, thiserror
// ============================================================================

//! ## Overview
//! A probe case issues one backend call, hands the [`Completion`] to
//! whatever task observes the response, and awaits the [`Expectation`] under
//! an explicit timeout. Fulfillment consumes the completion, so a case can
//! be signaled at most once regardless of success or error outcome; the
//! await suspends only the owning case, never the scheduler. There is no
//! cancellation: an issued call runs to fulfillment, abandonment, or
//! timeout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::time;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures observable on the awaiting side of an expectation.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpectationError {
    /// The timeout elapsed before the completion was fulfilled.
    #[error("expectation timed out after {} ms", .timeout.as_millis())]
    TimedOut {
        /// The timeout that elapsed.
        timeout: Duration,
    },
    /// The completion was dropped without being fulfilled.
    #[error("completion was dropped before fulfillment")]
    Abandoned,
}

// ============================================================================
// SECTION: Completion Pair
// ============================================================================

/// Sending half: fulfills the expectation with the case's payload.
///
/// # Invariants
/// - Fulfillment consumes the completion; a second signal is unrepresentable.
#[derive(Debug)]
pub struct Completion<T> {
    /// Underlying oneshot sender.
    tx: oneshot::Sender<T>,
}

impl<T> Completion<T> {
    /// Fulfills the expectation. Ignores the payload if the awaiting side
    /// already gave up.
    pub fn fulfill(self, value: T) {
        let _ = self.tx.send(value);
    }
}

/// Awaiting half: suspends the owning case until fulfillment or timeout.
#[derive(Debug)]
pub struct Expectation<T> {
    /// Underlying oneshot receiver.
    rx: oneshot::Receiver<T>,
}

impl<T> Expectation<T> {
    /// Awaits fulfillment for at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpectationError::TimedOut`] when the timeout elapses first
    /// and [`ExpectationError::Abandoned`] when the completion was dropped
    /// unfulfilled.
    pub async fn await_within(self, timeout: Duration) -> Result<T, ExpectationError> {
        match time::timeout(timeout, self.rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(ExpectationError::Abandoned),
            Err(_) => Err(ExpectationError::TimedOut {
                timeout,
            }),
        }
    }
}

/// Creates a connected completion/expectation pair.
#[must_use]
pub fn expectation<T>() -> (Completion<T>, Expectation<T>) {
    let (tx, rx) = oneshot::channel();
    (
        Completion {
            tx,
        },
        Expectation {
            rx,
        },
    )
}
