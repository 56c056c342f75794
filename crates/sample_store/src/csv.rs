//! CSV upload parsing
//!
//! Lenient policy: the first non-blank line names the channels, every later
//! line is one sample. A cell that fails to parse (or parses non-finite)
//! degrades to `0.0` instead of failing the load; only a file with zero
//! non-blank lines is rejected. Coercions are surfaced as counts, not
//! per-cell warnings.

use std::sync::Arc;

use contracts::{ChannelId, ReviewError, Sample, SampleSeries};
use tracing::{debug, instrument};

use crate::metrics::StoreMetrics;

/// CSV/sample store bound to one fixed sample rate.
///
/// The time axis of the produced series is always re-derived as
/// `i / sample_rate_hz`; a time column in the upload is parsed like any
/// other channel but never trusted as the axis.
pub struct CsvStore {
    sample_rate_hz: f64,
    metrics: Arc<StoreMetrics>,
}

impl CsvStore {
    /// Create a store parsing at the given sample rate.
    pub fn new(sample_rate_hz: f64) -> Self {
        Self::with_metrics(sample_rate_hz, Arc::new(StoreMetrics::new()))
    }

    /// Create a store sharing an existing metrics instance.
    pub fn with_metrics(sample_rate_hz: f64, metrics: Arc<StoreMetrics>) -> Self {
        Self {
            sample_rate_hz,
            metrics,
        }
    }

    /// Sample rate this store parses at.
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// Shared metrics reference.
    pub fn metrics(&self) -> Arc<StoreMetrics> {
        self.metrics.clone()
    }

    /// Parse an uploaded table into a fresh `SampleSeries`.
    ///
    /// # Errors
    /// - [`ReviewError::EmptyUpload`] when the text holds no non-blank lines
    /// - [`ReviewError::InvalidSampleRate`] when the store rate is invalid
    #[instrument(name = "csv_store_load", skip(self, raw), fields(rate = self.sample_rate_hz))]
    pub fn load(&self, raw: &str) -> Result<SampleSeries, ReviewError> {
        let (series, coerced) = parse_csv(raw, self.sample_rate_hz)?;

        self.metrics.record_rows(series.len() as u64);
        self.metrics.record_coerced(coerced);
        metrics::counter!("motion_review_rows_parsed_total").increment(series.len() as u64);
        if coerced > 0 {
            metrics::counter!("motion_review_cells_coerced_total").increment(coerced);
        }

        debug!(
            rows = series.len(),
            channels = series.channels().len(),
            coerced_cells = coerced,
            "CSV upload parsed"
        );

        Ok(series)
    }
}

/// Parse CSV text into a series plus the number of coerced cells.
///
/// Field layout: split on `,`, positionally matched to the header; rows
/// shorter than the header pad with zeros (counted as coercions), extra
/// fields are ignored.
pub fn parse_csv(raw: &str, sample_rate_hz: f64) -> Result<(SampleSeries, u64), ReviewError> {
    let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines.next().ok_or(ReviewError::EmptyUpload)?;
    let channels: Vec<ChannelId> = header
        .split(',')
        .map(|name| ChannelId::new(name.trim()))
        .collect();

    let mut coerced: u64 = 0;
    let mut samples = Vec::new();

    for line in lines {
        let mut values = vec![0.0_f64; channels.len()];
        let mut fields = line.split(',');

        for slot in values.iter_mut() {
            match fields.next() {
                Some(field) => match field.trim().parse::<f64>() {
                    Ok(v) if v.is_finite() => *slot = v,
                    _ => coerced += 1,
                },
                None => coerced += 1,
            }
        }

        samples.push(Sample::new(values));
    }

    let series = SampleSeries::new(channels, samples, sample_rate_hz)?;
    Ok((series, coerced))
}
