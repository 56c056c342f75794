//! Sync offset state: mark candidates and the apply operation.
//!
//! The offset relation is `data_time = video_time - offset`, established at
//! the moment the user pairs a video mark with a data mark. No automatic
//! re-synchronization ever occurs; the offset is a manual, explicit
//! relation that persists until replaced.

use tracing::{debug, info};

/// Sync offset plus the two pending mark candidates.
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    offset: f64,
    video_mark: Option<f64>,
    data_mark: Option<f64>,
}

impl SyncState {
    /// Fresh state: offset 0, no marks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset (`data_time = video_time - offset`).
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Overwrite the offset directly (project restore path).
    pub fn set_offset(&mut self, offset: f64) {
        debug!(offset, "sync offset restored");
        self.offset = offset;
    }

    /// Translate a video-timeline time into data-timeline coordinates.
    #[inline]
    pub fn video_to_data(&self, video_time: f64) -> f64 {
        video_time - self.offset
    }

    /// Set the video mark candidate unconditionally.
    pub fn mark_video(&mut self, time: f64) {
        debug!(time, "video mark set");
        self.video_mark = Some(time);
    }

    /// Set the data mark candidate.
    ///
    /// A `None` time with a loaded dataset defaults to 0 (the start of the
    /// data); with no dataset there is nothing to mark and the call is a
    /// no-op.
    pub fn mark_data(&mut self, time: Option<f64>, has_series: bool) {
        match (time, has_series) {
            (Some(t), _) => {
                debug!(time = t, "data mark set");
                self.data_mark = Some(t);
            }
            (None, true) => {
                debug!("data mark defaulted to 0");
                self.data_mark = Some(0.0);
            }
            (None, false) => {
                debug!("data mark ignored: no dataset loaded");
            }
        }
    }

    /// Pending video mark, if any.
    pub fn video_mark(&self) -> Option<f64> {
        self.video_mark
    }

    /// Pending data mark, if any.
    pub fn data_mark(&self) -> Option<f64> {
        self.data_mark
    }

    /// Whether both mark candidates are set.
    pub fn can_apply(&self) -> bool {
        self.video_mark.is_some() && self.data_mark.is_some()
    }

    /// Compute `offset = video_mark - data_mark`, consuming both marks.
    ///
    /// Returns the new offset, or `None` (no-op) when either mark is
    /// missing. Immediately after a successful apply, `can_apply()` is
    /// false until both marks are set again.
    pub fn apply(&mut self) -> Option<f64> {
        let video = self.video_mark?;
        let data = self.data_mark?;

        self.offset = video - data;
        self.video_mark = None;
        self.data_mark = None;

        info!(
            video_mark = video,
            data_mark = data,
            offset = self.offset,
            "sync offset applied"
        );
        metrics::counter!("motion_review_sync_applied_total").increment(1);

        Some(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_computes_difference() {
        let mut sync = SyncState::new();
        sync.mark_video(0.2);
        sync.mark_data(Some(1.5), true);

        assert!(sync.can_apply());
        assert_eq!(sync.apply(), Some(0.2 - 1.5));
        assert!((sync.offset() - (-1.3)).abs() < 1e-12);
    }

    #[test]
    fn test_apply_clears_marks() {
        let mut sync = SyncState::new();
        sync.mark_video(1.0);
        sync.mark_data(Some(0.5), true);
        sync.apply();

        assert!(!sync.can_apply());
        assert!(sync.video_mark().is_none());
        assert!(sync.data_mark().is_none());
    }

    #[test]
    fn test_apply_without_marks_is_noop() {
        let mut sync = SyncState::new();
        assert_eq!(sync.apply(), None);
        assert_eq!(sync.offset(), 0.0);

        sync.mark_video(2.0);
        assert!(!sync.can_apply());
        assert_eq!(sync.apply(), None);
        // A failed apply must not consume the lone mark
        assert_eq!(sync.video_mark(), Some(2.0));
    }

    #[test]
    fn test_mark_data_defaults_to_zero_with_series() {
        let mut sync = SyncState::new();
        sync.mark_data(None, true);
        assert_eq!(sync.data_mark(), Some(0.0));
    }

    #[test]
    fn test_mark_data_noop_without_series() {
        let mut sync = SyncState::new();
        sync.mark_data(None, false);
        assert_eq!(sync.data_mark(), None);
    }

    #[test]
    fn test_video_to_data_translation() {
        let mut sync = SyncState::new();
        sync.mark_video(0.2);
        sync.mark_data(Some(1.5), true);
        sync.apply();

        // offset = -1.3, so video 2.0 lands at data 3.3
        assert!((sync.video_to_data(2.0) - 3.3).abs() < 1e-12);
    }

    #[test]
    fn test_marks_can_be_replaced_before_apply() {
        let mut sync = SyncState::new();
        sync.mark_video(1.0);
        sync.mark_video(4.0);
        sync.mark_data(Some(1.0), true);
        assert_eq!(sync.apply(), Some(3.0));
    }
}
