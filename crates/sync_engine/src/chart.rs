//! Windowed chart updater.
//!
//! Pushes the full point set of each mapped channel to its chart surface,
//! then sets the visible window bounds and the marker overlay. This runs
//! on every frame of the render loop, so the missing-data paths are silent
//! no-ops rather than errors.

use contracts::{ChannelGroup, ChartSurface, RenderMeta, SampleSeries};
use tracing::trace;

use crate::window::ChartWindow;

struct ChartBinding {
    group: ChannelGroup,
    surface: Box<dyn ChartSurface>,
}

/// Drives the chart surfaces for the three channel groups.
#[derive(Default)]
pub struct ChartUpdater {
    bindings: Vec<ChartBinding>,
}

impl ChartUpdater {
    /// Updater with no surfaces attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach one chart surface for a channel group.
    pub fn attach(&mut self, group: ChannelGroup, surface: Box<dyn ChartSurface>) {
        self.bindings.push(ChartBinding { group, surface });
    }

    /// Detach all surfaces (dataset/mode switch).
    pub fn detach_all(&mut self) {
        self.bindings.clear();
    }

    /// Number of attached surfaces.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no surfaces are attached.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Render the window around `reference_time` (data-timeline seconds).
    ///
    /// Every attached surface receives the full unfiltered point set for
    /// its channels, the window as its visible x-range, and the marker
    /// percent. Returns `None` without touching anything when no dataset is
    /// loaded or no surfaces are attached.
    pub fn render(
        &mut self,
        series: Option<&SampleSeries>,
        reference_time: f64,
    ) -> Option<RenderMeta> {
        let series = series?;
        if self.bindings.is_empty() {
            return None;
        }

        let window = ChartWindow::around(reference_time);
        let marker = window.marker_percent(reference_time);
        let mut points_per_channel = 0;

        for binding in &mut self.bindings {
            for channel in &binding.group.channels {
                // Channels absent from this dataset are simply not charted.
                if let Some(points) = series.points(channel) {
                    points_per_channel = points.len();
                    binding.surface.set_series(channel, points);
                }
            }
            binding.surface.set_visible_range(window.start, window.end);
            binding.surface.set_marker(marker);
            binding.surface.redraw();
        }

        trace!(
            reference_time,
            window_start = window.start,
            window_end = window.end,
            marker,
            "chart window rendered"
        );
        metrics::counter!("motion_review_chart_renders_total").increment(1);
        metrics::histogram!("motion_review_marker_percent").record(marker);

        Some(RenderMeta {
            reference_time,
            window_start: window.start,
            window_end: window.end,
            marker_percent: marker,
            points_per_channel,
            surfaces_updated: self.bindings.len(),
        })
    }
}

/// In-memory chart surface recording the last state it was given.
///
/// Stands in for a real chart backend in tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryChart {
    /// Last point set per channel, in `set_series` call order
    pub series: Vec<(String, Vec<[f64; 2]>)>,
    /// Last visible range set
    pub visible_range: Option<(f64, f64)>,
    /// Last marker percent set
    pub marker_percent: Option<f64>,
    /// Number of redraws requested
    pub redraws: usize,
}

impl MemoryChart {
    /// Fresh empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last point set recorded for a channel.
    pub fn points_for(&self, channel: &str) -> Option<&[[f64; 2]]> {
        self.series
            .iter()
            .rev()
            .find(|(name, _)| name == channel)
            .map(|(_, points)| points.as_slice())
    }
}

impl ChartSurface for MemoryChart {
    fn set_series(&mut self, channel: &contracts::ChannelId, points: Vec<[f64; 2]>) {
        if let Some(entry) = self
            .series
            .iter_mut()
            .find(|(name, _)| name == channel.as_str())
        {
            entry.1 = points;
        } else {
            self.series.push((channel.as_str().to_string(), points));
        }
    }

    fn set_visible_range(&mut self, min: f64, max: f64) {
        self.visible_range = Some((min, max));
    }

    fn set_marker(&mut self, percent: f64) {
        self.marker_percent = Some(percent);
    }

    fn redraw(&mut self) {
        self.redraws += 1;
    }
}
