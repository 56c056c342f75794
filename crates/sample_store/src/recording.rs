//! Stream recording capture
//!
//! Append-only capture of decoded stream samples, convertible to a
//! `SampleSeries` for review or exported as the canonical CSV layout
//! (`Time,ax,..,mz`) so a recording can be re-uploaded later.

use contracts::{ChannelId, ReviewError, SampleSeries};
use tracing::debug;

use crate::stream::StreamSample;

/// Canonical channel order for recorded data.
const RECORD_CHANNELS: [&str; 9] = ["ax", "ay", "az", "gx", "gy", "gz", "mx", "my", "mz"];

/// An in-progress or finished stream recording.
#[derive(Debug)]
pub struct Recording {
    rows: Vec<StreamSample>,
    sample_rate_hz: f64,
}

impl Recording {
    /// Start an empty recording at the given sample rate.
    pub fn new(sample_rate_hz: f64) -> Self {
        Self {
            rows: Vec::new(),
            sample_rate_hz,
        }
    }

    /// Append one decoded sample.
    pub fn push(&mut self, sample: StreamSample) {
        self.rows.push(sample);
    }

    /// Number of captured samples.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Discard all captured samples.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Convert the capture into a review dataset.
    ///
    /// Row order is the capture order; the series re-derives its time axis
    /// from position, matching what a CSV re-upload of this recording would
    /// produce.
    pub fn to_series(&self) -> Result<SampleSeries, ReviewError> {
        let channels = RECORD_CHANNELS.iter().map(|c| ChannelId::new(c)).collect();
        let samples = self.rows.iter().map(StreamSample::to_row).collect();
        let series = SampleSeries::new(channels, samples, self.sample_rate_hz)?;
        debug!(rows = series.len(), "recording converted to series");
        Ok(series)
    }

    /// Render the capture in the canonical CSV layout.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("Time,ax,ay,az,gx,gy,gz,mx,my,mz\n");
        for (i, row) in self.rows.iter().enumerate() {
            let t = i as f64 / self.sample_rate_hz;
            out.push_str(&format!(
                "{t},{},{},{},{},{},{},{},{},{}\n",
                row.acc[0],
                row.acc[1],
                row.acc[2],
                row.gyro[0],
                row.gyro[1],
                row.gyro[2],
                row.mag[0],
                row.mag[1],
                row.mag[2],
            ));
        }
        out
    }
}
