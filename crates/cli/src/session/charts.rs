//! Logging chart surface.
//!
//! Headless stand-in for a real chart backend: records what it is told and
//! logs window/marker movement through tracing.

use contracts::{ChannelId, ChartSurface};
use tracing::{debug, trace};

/// Chart surface that logs updates instead of drawing.
pub struct LogChart {
    name: String,
    series_count: usize,
    visible_range: (f64, f64),
    marker_percent: f64,
    redraws: u64,
}

impl LogChart {
    /// Surface named after its channel group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            series_count: 0,
            visible_range: (0.0, 0.0),
            marker_percent: 0.0,
            redraws: 0,
        }
    }
}

impl ChartSurface for LogChart {
    fn set_series(&mut self, channel: &ChannelId, points: Vec<[f64; 2]>) {
        self.series_count += 1;
        trace!(
            chart = %self.name,
            channel = %channel,
            points = points.len(),
            "series replaced"
        );
    }

    fn set_visible_range(&mut self, min: f64, max: f64) {
        self.visible_range = (min, max);
    }

    fn set_marker(&mut self, percent: f64) {
        self.marker_percent = percent;
    }

    fn redraw(&mut self) {
        self.redraws += 1;
        debug!(
            chart = %self.name,
            window_start = self.visible_range.0,
            window_end = self.visible_range.1,
            marker = format!("{:.1}%", self.marker_percent),
            redraws = self.redraws,
            "chart redrawn"
        );
    }
}
