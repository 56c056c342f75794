//! Store counters
//!
//! Lenient parsing means a load can silently coerce cells; these counters
//! are how that is surfaced to the user (as counts, not per-cell warnings).

use std::sync::atomic::{AtomicU64, Ordering};

/// Sample store metrics
#[derive(Debug, Default)]
pub struct StoreMetrics {
    /// Total data rows parsed
    pub rows_parsed: AtomicU64,

    /// Total cells coerced to zero
    pub cells_coerced: AtomicU64,

    /// Total stream frames decoded
    pub frames_decoded: AtomicU64,

    /// Stream frame decode failures
    pub parse_errors: AtomicU64,

    /// Stream samples dropped on backpressure
    pub samples_dropped: AtomicU64,
}

impl StoreMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record parsed data rows
    pub fn record_rows(&self, count: u64) {
        self.rows_parsed.fetch_add(count, Ordering::Relaxed);
    }

    /// Record coerced cells
    pub fn record_coerced(&self, count: u64) {
        self.cells_coerced.fetch_add(count, Ordering::Relaxed);
    }

    /// Record decoded stream frames
    pub fn record_frames(&self, count: u64) {
        self.frames_decoded.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a frame decode failure
    pub fn record_parse_error(&self) {
        self.parse_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a dropped stream sample
    pub fn record_dropped(&self) {
        self.samples_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rows_parsed: self.rows_parsed.load(Ordering::Relaxed),
            cells_coerced: self.cells_coerced.load(Ordering::Relaxed),
            frames_decoded: self.frames_decoded.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
            samples_dropped: self.samples_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total data rows parsed
    pub rows_parsed: u64,

    /// Total cells coerced to zero
    pub cells_coerced: u64,

    /// Total stream frames decoded
    pub frames_decoded: u64,

    /// Stream frame decode failures
    pub parse_errors: u64,

    /// Stream samples dropped on backpressure
    pub samples_dropped: u64,
}
