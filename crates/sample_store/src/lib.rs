//! # Sample Store
//!
//! Sensor dataset ingestion module.
//!
//! Responsibilities:
//! - Parse uploaded CSV tables into a `SampleSeries` (lenient cell policy)
//! - Decode the two-part IMU9 notification frames of the live stream
//! - Buffer recent live samples for chart views (fixed-capacity ring)
//! - Capture stream recordings and convert them to datasets / canonical CSV
//!
//! ## Usage Example
//!
//! ```ignore
//! use sample_store::CsvStore;
//!
//! let store = CsvStore::new(104.0);
//! let series = store.load(&raw_text)?;
//! println!("{} rows, {:.2} s", series.len(), series.duration());
//! ```
//!
//! A loaded series replaces the previous one wholesale; anything bound to
//! the old series must be re-initialized, not incrementally updated.

mod csv;
mod live;
mod metrics;
mod recording;
mod stream;

// Re-exports
pub use crate::metrics::{MetricsSnapshot, StoreMetrics};
pub use contracts::{Sample, SampleSeries};
pub use csv::{parse_csv, CsvStore};
pub use live::{LiveBuffer, DEFAULT_LIVE_CAPACITY};
pub use recording::Recording;
pub use stream::{
    decode_frame, FrameAssembler, StreamIngest, StreamSample, PACKET_TYPE_DATA,
    PACKET_TYPE_DATA_PART2,
};
