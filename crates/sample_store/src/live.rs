//! Live sample ring buffer
//!
//! Holds the most recent stream samples for live chart views. Fixed
//! capacity; pushing past capacity overwrites the oldest sample.

use ringbuf::{traits::*, HeapRb};

use crate::stream::StreamSample;

/// Default live window: 500 points (a few seconds at 104 Hz).
pub const DEFAULT_LIVE_CAPACITY: usize = 500;

/// Fixed-capacity ring of recent stream samples.
pub struct LiveBuffer {
    ring: HeapRb<StreamSample>,
    sample_rate_hz: f64,
}

impl LiveBuffer {
    /// Create a buffer with the given capacity.
    pub fn new(capacity: usize, sample_rate_hz: f64) -> Self {
        Self {
            ring: HeapRb::new(capacity.max(1)),
            sample_rate_hz,
        }
    }

    /// Create a buffer with the default capacity.
    pub fn with_default_capacity(sample_rate_hz: f64) -> Self {
        Self::new(DEFAULT_LIVE_CAPACITY, sample_rate_hz)
    }

    /// Push one sample, overwriting the oldest when full.
    pub fn push(&mut self, sample: StreamSample) {
        if self.ring.is_full() {
            let _ = self.ring.try_pop();
        }
        let _ = self.ring.try_push(sample);
    }

    /// Number of buffered samples.
    pub fn len(&self) -> usize {
        self.ring.occupied_len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Buffer capacity.
    pub fn capacity(&self) -> usize {
        self.ring.capacity().get()
    }

    /// Drop all buffered samples.
    pub fn clear(&mut self) {
        while self.ring.try_pop().is_some() {}
    }

    /// `(time, value)` points for one well-known channel, oldest to newest.
    ///
    /// Unknown channels yield an empty vector.
    pub fn points(&self, channel: &str) -> Vec<[f64; 2]> {
        self.ring
            .iter()
            .filter_map(|s| s.value(channel).map(|v| [s.time(self.sample_rate_hz), v]))
            .collect()
    }

    /// Time of the newest buffered sample, if any.
    pub fn latest_time(&self) -> Option<f64> {
        self.ring.iter().last().map(|s| s.time(self.sample_rate_hz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(index: u32, v: f64) -> StreamSample {
        StreamSample {
            index,
            acc: [v, v, v],
            gyro: [v, v, v],
            mag: [v, v, v],
        }
    }

    #[test]
    fn test_overwrites_oldest_when_full() {
        let mut buffer = LiveBuffer::new(3, 104.0);
        for i in 0..5 {
            buffer.push(sample(i, i as f64));
        }
        assert_eq!(buffer.len(), 3);
        let pts = buffer.points("ax");
        assert_eq!(pts.len(), 3);
        assert!((pts[0][1] - 2.0).abs() < 1e-12);
        assert!((pts[2][1] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_points_time_axis() {
        let mut buffer = LiveBuffer::new(10, 104.0);
        buffer.push(sample(104, 1.0));
        buffer.push(sample(105, 2.0));
        let pts = buffer.points("gz");
        assert!((pts[0][0] - 1.0).abs() < 1e-12);
        assert!((buffer.latest_time().unwrap() - 105.0 / 104.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_channel_empty() {
        let mut buffer = LiveBuffer::new(4, 104.0);
        buffer.push(sample(0, 1.0));
        assert!(buffer.points("heart_rate").is_empty());
    }

    #[test]
    fn test_clear() {
        let mut buffer = LiveBuffer::with_default_capacity(104.0);
        assert_eq!(buffer.capacity(), DEFAULT_LIVE_CAPACITY);
        buffer.push(sample(0, 0.0));
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.latest_time().is_none());
    }
}
