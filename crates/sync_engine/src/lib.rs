//! # Sync Engine
//!
//! Video/IMU timeline synchronization core.
//!
//! Responsibilities:
//! - Session state lifecycle (dataset, timelines, sync offset)
//! - Manual mark/apply offset computation
//! - Timeline controllers with snap/clamp scrub policies
//! - Windowed chart updates and marker placement
//!
//! ## Usage Example
//!
//! ```ignore
//! use sync_engine::{ChartUpdater, Session};
//!
//! let mut session = Session::new(config);
//! session.load_series(series);
//!
//! session.mark_video();
//! session.mark_data();
//! let offset = session.apply_sync();
//!
//! // Video scrub drives the chart through the offset relation
//! let scrub = session.scrub_video(2.0);
//! updater.render(session.series(), scrub.reference_time);
//! ```
//!
//! The two playheads never mutate each other; translation between the
//! timelines only happens through the explicit offset
//! (`data_time = video_time - offset`).

mod chart;
mod controller;
mod offset;
mod session;
mod window;

// Re-exports
pub use chart::{ChartUpdater, MemoryChart};
pub use controller::{
    scrub_channel, snap_time, DataTimelineController, VideoTimelineController, SCRUB_QUEUE_CAPACITY,
};
pub use offset::SyncState;
pub use session::{Session, VideoScrub};
pub use window::{ChartWindow, WINDOW_SECS};

// Re-export contracts types used throughout the API
pub use contracts::{ChartSurface, RenderMeta, SampleSeries, SessionConfig, Timeline};
