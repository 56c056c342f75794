//! # Playback
//!
//! Cooperative playback driver for the IMU data timeline.
//!
//! Responsibilities:
//! - Advance the data playhead at a selected rate, one tick per host frame
//! - Clamp at the dataset end and stop (terminal condition)
//! - Yield to manual interaction: any manual scrub pauses playback
//! - Re-check enablement after asynchronous dataset loads (bounded polling)
//!
//! The driver never drives itself: the host calls [`PlaybackDriver::tick`]
//! from its per-frame callback, and the driver re-checks its own running
//! flag at tick entry so a cancelled tick applies no state.

mod driver;
mod ready;
mod scheduler;

// Re-exports
pub use driver::{PlaybackDriver, PlaybackState, Tick};
pub use ready::await_ready;
pub use scheduler::ManualScheduler;

// Re-export the scheduling contract alongside its test double
pub use contracts::{TickCallback, TickHandle, TickScheduler};
