//! Review-session metrics collection.
//!
//! Exports per-render and per-interaction metrics to the `metrics` facade
//! and aggregates them in memory for the end-of-run summary.

use std::collections::HashMap;

use contracts::RenderMeta;
use metrics::{counter, gauge, histogram};

/// Record metrics for one windowed chart render.
///
/// Call whenever the chart updater produces a [`RenderMeta`].
///
/// # Example
///
/// ```ignore
/// use observability::record_render_metrics;
///
/// if let Some(meta) = updater.render(session.series(), reference) {
///     record_render_metrics(&meta);
/// }
/// ```
pub fn record_render_metrics(meta: &RenderMeta) {
    counter!("motion_review_renders_total").increment(1);

    gauge!("motion_review_reference_time").set(meta.reference_time);
    gauge!("motion_review_marker_percent").set(meta.marker_percent);
    histogram!("motion_review_marker_percent_hist").record(meta.marker_percent);

    // Window span in seconds; narrows near the axis start
    histogram!("motion_review_window_span_s").record(meta.window_end - meta.window_start);

    gauge!("motion_review_points_per_channel").set(meta.points_per_channel as f64);
    gauge!("motion_review_chart_surfaces").set(meta.surfaces_updated as f64);
}

/// Record a scrub interaction on one of the timelines.
pub fn record_scrub(timeline: &str, requested: f64, actual: f64) {
    counter!(
        "motion_review_scrub_events_total",
        "timeline" => timeline.to_string()
    )
    .increment(1);
    histogram!(
        "motion_review_scrub_snap_delta_s",
        "timeline" => timeline.to_string()
    )
    .record((actual - requested).abs());
}

/// Record a playback state transition.
pub fn record_playback_state(playing: bool) {
    gauge!("motion_review_playback_playing").set(if playing { 1.0 } else { 0.0 });
}

/// Session metrics aggregator
///
/// Aggregates metrics in memory for summary output at the end of a run.
#[derive(Debug, Clone, Default)]
pub struct SessionMetricsAggregator {
    /// Total chart renders
    pub total_renders: u64,

    /// Renders with the marker clamped to an edge (0% or 100%)
    pub clamped_markers: u64,

    /// Marker percent statistics
    pub marker_stats: RunningStats,

    /// Window span statistics (seconds)
    pub window_stats: RunningStats,

    /// Reference time statistics (seconds)
    pub reference_stats: RunningStats,

    /// Scrub snap deltas per timeline (seconds)
    pub snap_stats: HashMap<String, RunningStats>,

    /// Scrub counts per timeline
    pub scrub_counts: HashMap<String, u64>,
}

impl SessionMetricsAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one render outcome into the aggregate
    pub fn update_render(&mut self, meta: &RenderMeta) {
        self.total_renders += 1;
        if meta.marker_percent <= 0.0 || meta.marker_percent >= 100.0 {
            self.clamped_markers += 1;
        }
        self.marker_stats.push(meta.marker_percent);
        self.window_stats.push(meta.window_end - meta.window_start);
        self.reference_stats.push(meta.reference_time);
    }

    /// Fold one scrub interaction into the aggregate
    pub fn update_scrub(&mut self, timeline: &str, requested: f64, actual: f64) {
        *self.scrub_counts.entry(timeline.to_string()).or_insert(0) += 1;
        self.snap_stats
            .entry(timeline.to_string())
            .or_default()
            .push((actual - requested).abs());
    }

    /// Produce the summary report
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total_renders: self.total_renders,
            clamped_markers: self.clamped_markers,
            clamp_rate: if self.total_renders > 0 {
                self.clamped_markers as f64 / self.total_renders as f64 * 100.0
            } else {
                0.0
            },
            marker_percent: StatsSummary::from(&self.marker_stats),
            window_span_s: StatsSummary::from(&self.window_stats),
            reference_time_s: StatsSummary::from(&self.reference_stats),
            scrub_counts: self.scrub_counts.clone(),
        }
    }

    /// Reset all aggregates
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Aggregated session summary
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub total_renders: u64,
    pub clamped_markers: u64,
    pub clamp_rate: f64,
    pub marker_percent: StatsSummary,
    pub window_span_s: StatsSummary,
    pub reference_time_s: StatsSummary,
    pub scrub_counts: HashMap<String, u64>,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Session Metrics Summary ===")?;
        writeln!(f, "Chart renders: {}", self.total_renders)?;
        writeln!(
            f,
            "Clamped markers: {} ({:.2}%)",
            self.clamped_markers, self.clamp_rate
        )?;
        writeln!(f, "Marker percent: {}", self.marker_percent)?;
        writeln!(f, "Window span (s): {}", self.window_span_s)?;
        writeln!(f, "Reference time (s): {}", self.reference_time_s)?;

        if !self.scrub_counts.is_empty() {
            writeln!(f, "Scrub counts:")?;
            for (timeline, count) in &self.scrub_counts {
                writeln!(f, "  {}: {}", timeline, count)?;
            }
        }

        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a new value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// Sample count
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Standard deviation
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Minimum
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum
    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats() {
        let mut stats = RunningStats::default();

        stats.push(1.0);
        stats.push(2.0);
        stats.push(3.0);
        stats.push(4.0);
        stats.push(5.0);

        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 3.0).abs() < 1e-10);
        assert!((stats.min() - 1.0).abs() < 1e-10);
        assert!((stats.max() - 5.0).abs() < 1e-10);
        assert!((stats.variance() - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_aggregator_update_render() {
        let mut aggregator = SessionMetricsAggregator::new();

        aggregator.update_render(&RenderMeta {
            reference_time: 3.3,
            window_start: 0.8,
            window_end: 5.8,
            marker_percent: 50.0,
            points_per_channel: 312,
            surfaces_updated: 3,
        });
        aggregator.update_render(&RenderMeta {
            reference_time: 10.0,
            window_start: 7.5,
            window_end: 12.5,
            marker_percent: 100.0,
            points_per_channel: 312,
            surfaces_updated: 3,
        });

        assert_eq!(aggregator.total_renders, 2);
        assert_eq!(aggregator.clamped_markers, 1);
        let summary = aggregator.summary();
        assert!((summary.clamp_rate - 50.0).abs() < 1e-10);
        assert!((summary.window_span_s.mean - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_aggregator_update_scrub() {
        let mut aggregator = SessionMetricsAggregator::new();
        aggregator.update_scrub("data", 1.49, 1.5);
        aggregator.update_scrub("data", 0.0, 0.0);
        aggregator.update_scrub("video", 2.0, 2.0);

        assert_eq!(aggregator.scrub_counts.get("data"), Some(&2));
        assert_eq!(aggregator.scrub_counts.get("video"), Some(&1));
    }

    #[test]
    fn test_summary_display() {
        let mut aggregator = SessionMetricsAggregator::new();
        aggregator.update_render(&RenderMeta {
            reference_time: 1.0,
            window_start: 0.0,
            window_end: 3.5,
            marker_percent: 28.57,
            points_per_channel: 10,
            surfaces_updated: 3,
        });

        let output = format!("{}", aggregator.summary());
        assert!(output.contains("Chart renders: 1"));
        assert!(output.contains("Marker percent"));
    }
}
