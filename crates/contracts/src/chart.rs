//! ChartSurface trait - chart backend abstraction
//!
//! The sync core needs exactly four operations from a chart: replace a
//! series' point set, move the visible x-range, position the time marker,
//! and trigger a redraw. Backends (and test fakes) implement this trait;
//! the core never touches a concrete chart type.

use serde::{Deserialize, Serialize};

use crate::ChannelId;

/// Narrow chart interface consumed by the windowed chart updater.
///
/// Implementations must tolerate being called every frame; all four
/// operations should be cheap when nothing changed.
pub trait ChartSurface: Send {
    /// Replace the full point set for one series (`[time, value]` pairs).
    ///
    /// Windowing is a view-bounds operation: the full unfiltered point set
    /// is handed over and only the visible range changes afterwards.
    fn set_series(&mut self, channel: &ChannelId, points: Vec<[f64; 2]>);

    /// Set the visible x-axis bounds (seconds).
    fn set_visible_range(&mut self, min: f64, max: f64);

    /// Position the current-time marker overlay, as a percentage `[0, 100]`
    /// of the visible range.
    fn set_marker(&mut self, percent: f64);

    /// Flush pending changes to the backend.
    fn redraw(&mut self);
}

/// Outcome record of one windowed chart render, for metrics aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderMeta {
    /// Reference time the window was centered on (data-timeline seconds)
    pub reference_time: f64,

    /// Visible window start (seconds)
    pub window_start: f64,

    /// Visible window end (seconds)
    pub window_end: f64,

    /// Marker position within the window, `[0, 100]`
    pub marker_percent: f64,

    /// Points pushed per channel series
    pub points_per_channel: usize,

    /// Number of chart surfaces updated
    pub surfaces_updated: usize,
}
