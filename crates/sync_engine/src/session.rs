//! Session state object.
//!
//! One review session: the loaded dataset, the two timeline controllers and
//! the sync state, with a defined lifecycle (created at app start, reset on
//! new dataset/media load, torn down on session end). Only the dataset-load
//! and sync-apply operations mutate the shared state; everything else reads.

use contracts::{ProjectRecord, ReviewError, SampleSeries, SessionConfig, TimestepNote};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::controller::{DataTimelineController, VideoTimelineController};
use crate::offset::SyncState;

/// Result of a video scrub: the clamped time, the step readout shown next
/// to it, and the data-timeline reference the chart window should center on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoScrub {
    /// Playhead position actually taken (clamped)
    pub actual_time: f64,
    /// Discretized step index at the new position
    pub step_index: u64,
    /// Chart reference in data-timeline coordinates (`time - offset`)
    pub reference_time: f64,
}

/// Review-session state.
pub struct Session {
    config: SessionConfig,
    series: Option<SampleSeries>,
    sync: SyncState,
    video: VideoTimelineController,
    data: DataTimelineController,
}

impl Session {
    /// Fresh session: no dataset, offset 0, empty timelines.
    pub fn new(config: SessionConfig) -> Self {
        let video = VideoTimelineController::new(config.step_rate_hz);
        Self {
            config,
            series: None,
            sync: SyncState::new(),
            video,
            data: DataTimelineController::new(),
        }
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ===== Dataset lifecycle =====

    /// Replace the dataset wholesale.
    ///
    /// The data timeline is re-initialized (duration from the new series,
    /// playhead at 0) and its control binding is dropped; callers must
    /// re-bind, which is what makes repeated loads leak-free.
    #[instrument(name = "session_load_series", skip(self, series), fields(rows = series.len()))]
    pub fn load_series(&mut self, series: SampleSeries) {
        self.data.reset_for(&series);
        info!(
            rows = series.len(),
            duration = series.duration(),
            rate = series.sample_rate_hz(),
            "dataset loaded"
        );
        self.series = Some(series);
    }

    /// Drop the dataset (mode switch), tearing the data timeline down.
    pub fn clear_series(&mut self) {
        self.series = None;
        self.data.clear();
        debug!("dataset cleared");
    }

    /// Loaded dataset view.
    pub fn series(&self) -> Option<&SampleSeries> {
        self.series.as_ref()
    }

    /// Whether a dataset is loaded.
    pub fn has_series(&self) -> bool {
        self.series.is_some()
    }

    /// Data timeline duration; 0 with no dataset.
    pub fn data_duration(&self) -> f64 {
        self.series.as_ref().map(SampleSeries::duration).unwrap_or(0.0)
    }

    // ===== Timeline views =====

    /// Video controller view.
    pub fn video(&self) -> &VideoTimelineController {
        &self.video
    }

    /// Data controller view.
    pub fn data(&self) -> &DataTimelineController {
        &self.data
    }

    /// Set the video duration from media metadata.
    pub fn set_video_duration(&mut self, duration: f64) {
        self.video.set_duration(duration);
    }

    // ===== Control bindings =====

    /// Bind the video scrub control (drops any previous binding).
    pub fn bind_video_control(&mut self, rx: mpsc::Receiver<f64>) {
        self.video.bind(rx);
    }

    /// Bind the data scrub control (drops any previous binding).
    pub fn bind_data_control(&mut self, rx: mpsc::Receiver<f64>) {
        self.data.bind(rx);
    }

    /// Pending manual video scrub requests.
    pub fn drain_video_scrubs(&mut self) -> Vec<f64> {
        self.video.drain_scrubs()
    }

    /// Pending manual data scrub requests.
    pub fn drain_data_scrubs(&mut self) -> Vec<f64> {
        self.data.drain_scrubs()
    }

    // ===== Scrubbing =====

    /// Scrub the video timeline.
    ///
    /// The returned reference time is translated into data-timeline
    /// coordinates through the offset; the data playhead itself is not
    /// moved. This is the one cross-timeline translation path.
    pub fn scrub_video(&mut self, requested: f64) -> VideoScrub {
        let actual = self.video.scrub_to(requested);
        VideoScrub {
            actual_time: actual,
            step_index: self.video.step_index(),
            reference_time: self.sync.video_to_data(actual),
        }
    }

    /// Scrub the data timeline, snapping to the sample axis.
    ///
    /// Returns the snapped time to center the chart window on (no offset
    /// translation; the data timeline is authoritative over itself), or
    /// `None` when no dataset is loaded.
    pub fn scrub_data(&mut self, requested: f64) -> Option<f64> {
        let series = self.series.as_ref()?;
        Some(self.data.scrub_to(series, requested))
    }

    // ===== Sync offset =====

    /// Sync state view.
    pub fn sync(&self) -> &SyncState {
        &self.sync
    }

    /// Mark the current video playhead as the video sync candidate.
    pub fn mark_video(&mut self) {
        self.sync.mark_video(self.video.current_time());
    }

    /// Mark the current data playhead as the data sync candidate.
    pub fn mark_data(&mut self) {
        let time = self.series.as_ref().map(|_| self.data.current_time());
        self.sync.mark_data(time, self.series.is_some());
    }

    /// Whether both sync marks are set.
    pub fn can_apply_sync(&self) -> bool {
        self.sync.can_apply()
    }

    /// Apply the pending marks into a new offset; `None` when a mark is
    /// missing (silent no-op, the control stays disabled).
    pub fn apply_sync(&mut self) -> Option<f64> {
        self.sync.apply()
    }

    /// Translate a video time into data-timeline coordinates.
    pub fn video_to_data(&self, video_time: f64) -> f64 {
        self.sync.video_to_data(video_time)
    }

    // ===== Persistence =====

    /// Restore a persisted project: the sync offset only.
    ///
    /// Neither playhead is moved; re-synchronizing the current positions is
    /// explicitly not part of loading a project. The annotation list is
    /// restored by the caller alongside this.
    pub fn apply_project(&mut self, record: &ProjectRecord) {
        if let Some(series) = &self.series {
            if (series.sample_rate_hz() - record.sample_rate).abs() > f64::EPSILON {
                warn!(
                    series_rate = series.sample_rate_hz(),
                    record_rate = record.sample_rate,
                    "project record sample rate differs from loaded dataset"
                );
            }
        }
        self.sync.set_offset(record.sync_offset);
        info!(offset = record.sync_offset, "project restored");
    }

    /// Snapshot the session into a persistable record.
    pub fn to_project_record(
        &self,
        annotations: Vec<TimestepNote>,
        notes: impl Into<String>,
    ) -> ProjectRecord {
        let mut record = ProjectRecord::new(
            self.sync.offset(),
            annotations,
            self.series
                .as_ref()
                .map(SampleSeries::sample_rate_hz)
                .unwrap_or(self.config.sample_rate_hz),
        );
        record.notes = notes.into();
        record
    }

    /// Tear the session down to its initial state.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        *self = Session::new(config);
        debug!("session reset");
    }
}

// Session construction from raw text lives in the sample store; keep a
// convenience here for callers that already have a parsed series.
impl Session {
    /// Build a session and immediately load a dataset.
    pub fn with_series(config: SessionConfig, series: SampleSeries) -> Result<Self, ReviewError> {
        if series.sample_rate_hz() <= 0.0 {
            return Err(ReviewError::InvalidSampleRate {
                rate: series.sample_rate_hz(),
            });
        }
        let mut session = Session::new(config);
        session.load_series(series);
        Ok(session)
    }
}
