//! Sample / SampleSeries - Sample Store output
//!
//! One parsed dataset: a channel list, the parsed rows, and the derived time
//! axis. The time axis is always `time[i] = i / sample_rate_hz`; timestamps
//! embedded in the upload are never trusted.

use serde::{Deserialize, Serialize};

use crate::{ChannelId, ReviewError};

/// One parsed row of sensor data.
///
/// Values are aligned positionally to the owning series' channel list.
/// Non-finite or unparseable cells have already been coerced to `0.0` by the
/// store; a `Sample` is immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Build a sample from already-coerced values.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Value at the given channel position, if in range.
    #[inline]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Number of values in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered sequence of samples plus its derived time axis.
///
/// Invariants, enforced at construction:
/// - `times.len() == samples.len()`
/// - `times[i] = i / sample_rate_hz` (strictly non-decreasing)
/// - `sample_rate_hz` is a fixed positive constant for the life of the series
///
/// A series is replaced wholesale on the next upload; anything bound to the
/// old series must be re-initialized, not incrementally updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSeries {
    channels: Vec<ChannelId>,
    samples: Vec<Sample>,
    times: Vec<f64>,
    sample_rate_hz: f64,
}

impl SampleSeries {
    /// Assemble a series from parsed rows, deriving the time axis.
    ///
    /// # Errors
    /// Fails when `sample_rate_hz` is not a positive finite number.
    pub fn new(
        channels: Vec<ChannelId>,
        samples: Vec<Sample>,
        sample_rate_hz: f64,
    ) -> Result<Self, ReviewError> {
        if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
            return Err(ReviewError::InvalidSampleRate {
                rate: sample_rate_hz,
            });
        }

        let times = (0..samples.len())
            .map(|i| i as f64 / sample_rate_hz)
            .collect();

        Ok(Self {
            channels,
            samples,
            times,
            sample_rate_hz,
        })
    }

    /// Channel list, in header order.
    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    /// Parsed rows.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Derived time axis (seconds).
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Fixed sample rate this series was parsed at.
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// Number of data rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total duration reported for the dataset: `rows / rate`.
    ///
    /// Note this is one sample interval past [`last_timestamp`](Self::last_timestamp);
    /// scrub snapping operates on the timestamp axis, duration reporting and
    /// playback termination use this value.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz
    }

    /// Timestamp of the final row, if any.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Position of a channel in the header order.
    pub fn channel_index(&self, channel: &str) -> Option<usize> {
        self.channels.iter().position(|c| c.as_str() == channel)
    }

    /// Value of `channel` at row `row`.
    pub fn value(&self, row: usize, channel: &str) -> Option<f64> {
        let idx = self.channel_index(channel)?;
        self.samples.get(row)?.value(idx)
    }

    /// Full `(time, value)` point set for one channel, for chart series.
    ///
    /// Returns `None` when the channel is not present in this dataset (the
    /// chart mapping skips it). All points are returned regardless of the
    /// visible window; windowing is a view-bounds operation.
    pub fn points(&self, channel: &str) -> Option<Vec<[f64; 2]>> {
        let idx = self.channel_index(channel)?;
        Some(
            self.samples
                .iter()
                .zip(self.times.iter())
                .map(|(sample, &t)| [t, sample.value(idx).unwrap_or(0.0)])
                .collect(),
        )
    }
}

/// A named triple of channels rendered together on one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelGroup {
    /// Display name, e.g. "Accelerometer"
    pub name: String,

    /// The three channels plotted on this chart
    pub channels: [ChannelId; 3],
}

impl ChannelGroup {
    /// Build a group from a name and three channel names.
    pub fn new(name: impl Into<String>, channels: [&str; 3]) -> Self {
        Self {
            name: name.into(),
            channels: channels.map(ChannelId::new),
        }
    }

    /// The default accelerometer / gyroscope / magnetometer mapping.
    pub fn defaults() -> [ChannelGroup; 3] {
        use crate::channel::headers;
        [
            ChannelGroup::new("Accelerometer", headers::ACCELEROMETER),
            ChannelGroup::new("Gyroscope", headers::GYROSCOPE),
            ChannelGroup::new("Magnetometer", headers::MAGNETOMETER),
        ]
    }
}
