//! Bounded enablement polling.
//!
//! Dataset availability can change asynchronously (file reads, project
//! imports) outside the driver's direct notification, so enablement is
//! re-checked by short bounded polling rather than assumed.

use std::time::Duration;

use tracing::{debug, trace};

/// Poll `probe` until it returns true, at most `attempts` times spaced by
/// `interval`. Returns the final probe result.
///
/// The probe runs once before the first sleep, so an already-ready state
/// returns immediately.
pub async fn await_ready<F>(mut probe: F, attempts: u32, interval: Duration) -> bool
where
    F: FnMut() -> bool,
{
    for attempt in 0..attempts {
        if probe() {
            trace!(attempt, "readiness probe satisfied");
            return true;
        }
        tokio::time::sleep(interval).await;
    }

    let ready = probe();
    if !ready {
        debug!(attempts, "readiness polling exhausted");
    }
    ready
}
