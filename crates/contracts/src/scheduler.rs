//! TickScheduler trait - cooperative per-frame ticking abstraction
//!
//! The playback driver asks the host for one tick at a time and re-requests
//! from inside the callback, mirroring a display-refresh callback loop.
//! Cancellation is cooperative: the driver additionally checks its own
//! running flag at tick entry, so a stale tick that slips past
//! `cancel_tick` still applies no state.

/// Opaque handle identifying one pending tick request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Callback invoked with the elapsed seconds since the previous tick.
pub type TickCallback = Box<dyn FnMut(f64) + Send>;

/// Host scheduling abstraction for cooperative single-threaded ticking.
///
/// A request registers exactly one future callback invocation; a driver
/// that wants continuous ticking re-requests from within its callback.
pub trait TickScheduler: Send {
    /// Request a single tick. Returns a handle usable with
    /// [`cancel_tick`](Self::cancel_tick).
    fn request_tick(&mut self, callback: TickCallback) -> TickHandle;

    /// Cancel a pending tick request. Unknown or already-fired handles are
    /// ignored.
    fn cancel_tick(&mut self, handle: TickHandle);
}
