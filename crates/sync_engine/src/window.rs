//! Chart window math.
//!
//! The visible window is a fixed-width slice of the data time axis centered
//! on a reference time, clamped at 0 on the left. Windowing is a view-bounds
//! operation; the underlying chart data is never re-sliced.

use serde::{Deserialize, Serialize};

/// Fixed chart window width (seconds).
pub const WINDOW_SECS: f64 = 5.0;

/// Visible x-axis bounds for one render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartWindow {
    /// Window start (seconds)
    pub start: f64,
    /// Window end (seconds)
    pub end: f64,
}

impl ChartWindow {
    /// Window of the fixed width around a reference time:
    /// `[max(0, t - W/2), t + W/2]`.
    pub fn around(reference_time: f64) -> Self {
        Self::with_width(reference_time, WINDOW_SECS)
    }

    /// Window of an explicit width around a reference time.
    ///
    /// The left edge clamps at 0; the right edge does not shift to
    /// compensate, so windows near the start of the axis are narrower.
    pub fn with_width(reference_time: f64, width: f64) -> Self {
        let half = width / 2.0;
        Self {
            start: (reference_time - half).max(0.0),
            end: reference_time + half,
        }
    }

    /// Window span in seconds.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Marker overlay position for a time, as a percentage of the window:
    /// `clamp(((t - start) / (end - start)) * 100, 0, 100)`.
    pub fn marker_percent(&self, time: f64) -> f64 {
        let span = self.span();
        if !(span.is_finite() && span > 0.0) {
            return 0.0;
        }
        (((time - self.start) / span) * 100.0).clamp(0.0, 100.0)
    }
}
