//! Manual tick scheduler.
//!
//! Deterministic `TickScheduler` for tests and headless runs: ticks fire
//! only when the owner calls [`ManualScheduler::fire`], standing in for a
//! display-refresh callback.

use contracts::{TickCallback, TickHandle, TickScheduler};

/// Scheduler whose ticks are fired explicitly by the caller.
#[derive(Default)]
pub struct ManualScheduler {
    next_handle: u64,
    pending: Vec<(TickHandle, TickCallback)>,
}

impl ManualScheduler {
    /// Fresh scheduler with no pending requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending tick requests.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Fire all pending ticks with the given elapsed time.
    ///
    /// Requests are one-shot: the pending set is drained before the
    /// callbacks run, so a callback re-requesting a tick (the continuous
    /// playback pattern) lands in the next round, not this one.
    pub fn fire(&mut self, elapsed: f64) -> usize {
        let batch = std::mem::take(&mut self.pending);
        let fired = batch.len();
        for (_, mut callback) in batch {
            callback(elapsed);
        }
        fired
    }
}

impl TickScheduler for ManualScheduler {
    fn request_tick(&mut self, callback: TickCallback) -> TickHandle {
        self.next_handle += 1;
        let handle = TickHandle(self.next_handle);
        self.pending.push((handle, callback));
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}
