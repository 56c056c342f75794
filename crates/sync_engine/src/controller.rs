//! Timeline controllers.
//!
//! Each controller owns one timeline's scrub policy and the binding to its
//! input control. Controls deliver scrub requests over a channel; binding a
//! controller always drops the previous receiver first, so repeated setup
//! (after every dataset load) can never leave a stale listener attached.

use contracts::{SampleSeries, StepCounter, Timeline};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Queue depth for pending scrub requests from one control.
pub const SCRUB_QUEUE_CAPACITY: usize = 64;

/// Create a scrub request channel pair for wiring a control to a controller.
pub fn scrub_channel() -> (mpsc::Sender<f64>, mpsc::Receiver<f64>) {
    mpsc::channel(SCRUB_QUEUE_CAPACITY)
}

/// Snap a requested time to the dataset's time axis: the first sample
/// timestamp `>= requested`, or the last timestamp when the request is past
/// the end. Requests at or below 0 snap to the first timestamp.
pub fn snap_time(series: &SampleSeries, requested: f64) -> f64 {
    let times = series.times();
    let idx = times.partition_point(|&t| t < requested);
    match times.get(idx) {
        Some(&t) => t,
        None => times.last().copied().unwrap_or(0.0),
    }
}

/// Controller for the IMU data timeline.
///
/// The data timeline is authoritative over itself: scrubs snap to the
/// sample axis and are never offset-translated. It must not (and cannot)
/// mutate the video timeline.
#[derive(Debug, Default)]
pub struct DataTimelineController {
    timeline: Timeline,
    scrub_rx: Option<mpsc::Receiver<f64>>,
}

impl DataTimelineController {
    /// Controller with an empty timeline and no control bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline view.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current data playhead (seconds).
    pub fn current_time(&self) -> f64 {
        self.timeline.current()
    }

    /// Re-initialize for a freshly loaded dataset: duration from the
    /// series, playhead at 0, any bound control detached (callers re-bind).
    pub fn reset_for(&mut self, series: &SampleSeries) {
        self.timeline = Timeline::new(series.duration());
        self.unbind();
        debug!(duration = self.timeline.duration(), "data timeline reset");
    }

    /// Tear down to the no-dataset state.
    pub fn clear(&mut self) {
        self.timeline = Timeline::new(0.0);
        self.unbind();
    }

    /// Attach a scrub control receiver, replacing any previous binding.
    ///
    /// Remove-then-add: the prior receiver is dropped before the new one is
    /// stored, so a load/bind cycle can never accumulate listeners.
    pub fn bind(&mut self, rx: mpsc::Receiver<f64>) {
        if self.scrub_rx.take().is_some() {
            debug!("data scrub control re-bound, previous listener dropped");
        }
        self.scrub_rx = Some(rx);
    }

    /// Detach the scrub control, if any. Idempotent.
    pub fn unbind(&mut self) {
        self.scrub_rx = None;
    }

    /// Whether a control is currently bound.
    pub fn is_bound(&self) -> bool {
        self.scrub_rx.is_some()
    }

    /// Drain pending manual scrub requests from the bound control.
    pub fn drain_scrubs(&mut self) -> Vec<f64> {
        let mut requests = Vec::new();
        if let Some(rx) = self.scrub_rx.as_mut() {
            while let Ok(t) = rx.try_recv() {
                requests.push(t);
            }
        }
        requests
    }

    /// Snap `requested` to the sample axis and move the playhead there.
    /// Returns the snapped time; the caller renders the chart window with
    /// it directly.
    pub fn scrub_to(&mut self, series: &SampleSeries, requested: f64) -> f64 {
        let snapped = snap_time(series, requested);
        self.timeline.seek(snapped);
        trace!(requested, snapped, "data scrub");
        metrics::counter!("motion_review_scrubs_total", "timeline" => "data").increment(1);
        snapped
    }
}

/// Controller for the video timeline.
///
/// Scrubs clamp to the video duration and maintain the discretized step
/// readout. Chart rendering from this side goes through the sync offset
/// (`reference = time - offset`), computed by the session facade; the data
/// timeline's own playhead is never touched.
#[derive(Debug)]
pub struct VideoTimelineController {
    timeline: Timeline,
    steps: StepCounter,
    scrub_rx: Option<mpsc::Receiver<f64>>,
}

impl VideoTimelineController {
    /// Controller with an empty timeline at the given step rate.
    pub fn new(step_rate_hz: f64) -> Self {
        Self {
            timeline: Timeline::new(0.0),
            steps: StepCounter::new(step_rate_hz),
            scrub_rx: None,
        }
    }

    /// Timeline view.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current video playhead (seconds).
    pub fn current_time(&self) -> f64 {
        self.timeline.current()
    }

    /// Set the video duration from media metadata, re-clamping the playhead.
    pub fn set_duration(&mut self, duration: f64) {
        self.timeline.set_duration(duration);
        debug!(duration, "video duration set");
    }

    /// Clamp `requested` into `[0, duration]` and move the playhead.
    pub fn scrub_to(&mut self, requested: f64) -> f64 {
        let actual = self.timeline.seek(requested);
        trace!(requested, actual, step = self.step_index(), "video scrub");
        metrics::counter!("motion_review_scrubs_total", "timeline" => "video").increment(1);
        actual
    }

    /// Discretized step index for the current playhead.
    pub fn step_index(&self) -> u64 {
        self.steps
            .index(self.timeline.current(), self.timeline.duration())
    }

    /// Total step count for the current duration.
    pub fn total_steps(&self) -> u64 {
        self.steps.total_steps(self.timeline.duration())
    }

    /// Attach a scrub control receiver, replacing any previous binding.
    pub fn bind(&mut self, rx: mpsc::Receiver<f64>) {
        if self.scrub_rx.take().is_some() {
            debug!("video scrub control re-bound, previous listener dropped");
        }
        self.scrub_rx = Some(rx);
    }

    /// Detach the scrub control, if any. Idempotent.
    pub fn unbind(&mut self) {
        self.scrub_rx = None;
    }

    /// Whether a control is currently bound.
    pub fn is_bound(&self) -> bool {
        self.scrub_rx.is_some()
    }

    /// Drain pending manual scrub requests from the bound control.
    pub fn drain_scrubs(&mut self) -> Vec<f64> {
        let mut requests = Vec::new();
        if let Some(rx) = self.scrub_rx.as_mut() {
            while let Ok(t) = rx.try_recv() {
                requests.push(t);
            }
        }
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ChannelId, Sample, SampleSeries};

    fn series(rows: usize, rate: f64) -> SampleSeries {
        let channels = vec![ChannelId::new("ax")];
        let samples = (0..rows).map(|i| Sample::new(vec![i as f64])).collect();
        SampleSeries::new(channels, samples, rate).unwrap()
    }

    #[test]
    fn test_snap_to_first_at_or_below_zero() {
        let s = series(10, 10.0);
        assert_eq!(snap_time(&s, 0.0), 0.0);
        assert_eq!(snap_time(&s, -5.0), 0.0);
    }

    #[test]
    fn test_snap_to_first_timestamp_at_or_after() {
        let s = series(10, 10.0);
        // Between 0.2 and 0.3 snaps forward
        assert!((snap_time(&s, 0.25) - 0.3).abs() < 1e-12);
        // Exact hit stays
        assert!((snap_time(&s, 0.3) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_snap_past_end_uses_last() {
        let s = series(10, 10.0);
        assert!((snap_time(&s, 99.0) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_scenario_snap_at_104hz() {
        let s = series(312, 104.0);
        let snapped = snap_time(&s, 1.5);
        assert!((snapped - 156.0 / 104.0).abs() < 1e-12);
        assert!((snapped - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_data_scrub_moves_only_data_timeline() {
        let s = series(312, 104.0);
        let mut data = DataTimelineController::new();
        data.reset_for(&s);

        let snapped = data.scrub_to(&s, 1.5);
        assert!((data.current_time() - snapped).abs() < 1e-12);
        assert!((data.timeline().duration() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_video_scrub_clamps_and_steps() {
        let mut video = VideoTimelineController::new(30.0);
        video.set_duration(10.0);

        assert_eq!(video.scrub_to(-1.0), 0.0);
        assert_eq!(video.scrub_to(4.5), 4.5);
        assert_eq!(video.step_index(), 135);
        assert_eq!(video.scrub_to(25.0), 10.0);
        assert_eq!(video.step_index(), 300);
        assert_eq!(video.total_steps(), 300);
    }

    #[test]
    fn test_bind_replaces_previous_listener() {
        let mut data = DataTimelineController::new();

        let (tx1, rx1) = scrub_channel();
        data.bind(rx1);
        let (tx2, rx2) = scrub_channel();
        data.bind(rx2);

        // The first control's channel is closed; its sends go nowhere.
        assert!(tx1.try_send(1.0).is_err());
        tx2.try_send(2.0).unwrap();

        assert_eq!(data.drain_scrubs(), vec![2.0]);
    }

    #[test]
    fn test_unbind_is_idempotent() {
        let mut video = VideoTimelineController::new(30.0);
        let (_tx, rx) = scrub_channel();
        video.bind(rx);
        assert!(video.is_bound());
        video.unbind();
        video.unbind();
        assert!(!video.is_bound());
        assert!(video.drain_scrubs().is_empty());
    }

    #[test]
    fn test_reset_for_detaches_control() {
        let s = series(10, 10.0);
        let mut data = DataTimelineController::new();
        let (_tx, rx) = scrub_channel();
        data.bind(rx);

        data.reset_for(&s);
        assert!(!data.is_bound());
    }
}
