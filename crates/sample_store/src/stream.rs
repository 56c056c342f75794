//! Live IMU9 stream frame decoding
//!
//! The sensor delivers each 8-sample frame as two notifications: a type-2
//! packet carrying the first half and a type-3 packet completing it. The
//! combined buffer holds a little-endian `u32` sample counter at offset 2,
//! then three blocks of 8 xyz `f32` triplets (accelerometer, gyroscope,
//! magnetometer), 96 bytes per block.

use std::sync::Arc;

use async_channel::{bounded, Receiver, Sender};
use bytes::{Buf, Bytes};
use contracts::{ReviewError, Sample};
use tracing::{debug, trace, warn};

use crate::metrics::StoreMetrics;

/// First-half notification packet type.
pub const PACKET_TYPE_DATA: u8 = 2;
/// Completing notification packet type.
pub const PACKET_TYPE_DATA_PART2: u8 = 3;

/// Samples carried per combined frame.
const SAMPLES_PER_FRAME: usize = 8;
/// Bytes per xyz block: 8 samples * 3 axes * 4 bytes.
const VECTOR_STRIDE: usize = 96;
/// Frame header: packet type, reference, u32 sample counter.
const HEADER_LEN: usize = 6;
/// Combined frame length: header + acc/gyro/mag blocks.
const FRAME_LEN: usize = HEADER_LEN + 3 * VECTOR_STRIDE;
/// Payload of a part-2 packet starts after its 2-byte header.
const PART2_SKIP: usize = 2;

/// One decoded stream sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamSample {
    /// Device sample counter; the time axis is `index / sample_rate_hz`
    pub index: u32,
    /// Accelerometer xyz
    pub acc: [f64; 3],
    /// Gyroscope xyz
    pub gyro: [f64; 3],
    /// Magnetometer xyz
    pub mag: [f64; 3],
}

impl StreamSample {
    /// Sample time in seconds at the given rate.
    pub fn time(&self, sample_rate_hz: f64) -> f64 {
        self.index as f64 / sample_rate_hz
    }

    /// Channel value by well-known header name (`ax`..`mz`).
    pub fn value(&self, channel: &str) -> Option<f64> {
        let axis = |block: &[f64; 3], idx: usize| block.get(idx).copied();
        let mut chars = channel.chars();
        let block = match chars.next()? {
            'a' => &self.acc,
            'g' => &self.gyro,
            'm' => &self.mag,
            _ => return None,
        };
        match chars.next()? {
            'x' => axis(block, 0),
            'y' => axis(block, 1),
            'z' => axis(block, 2),
            _ => None,
        }
    }

    /// Convert to a dataset row in canonical channel order (`ax`..`mz`).
    pub fn to_row(&self) -> Sample {
        let mut values = Vec::with_capacity(9);
        values.extend_from_slice(&self.acc);
        values.extend_from_slice(&self.gyro);
        values.extend_from_slice(&self.mag);
        Sample::new(values)
    }
}

/// Decode one combined frame into its 8 samples.
///
/// # Errors
/// [`ReviewError::FrameDecode`] when the buffer is shorter than a full frame.
pub fn decode_frame(combined: &[u8]) -> Result<Vec<StreamSample>, ReviewError> {
    if combined.len() < FRAME_LEN {
        return Err(ReviewError::frame_decode(format!(
            "frame too short: {} bytes, expected {FRAME_LEN}",
            combined.len()
        )));
    }

    let counter = (&combined[2..6]).get_u32_le();

    let read_vec = |base: usize| -> [f64; 3] {
        let mut out = [0.0; 3];
        for (axis, slot) in out.iter_mut().enumerate() {
            let off = base + axis * 4;
            *slot = (&combined[off..off + 4]).get_f32_le() as f64;
        }
        out
    };

    let mut samples = Vec::with_capacity(SAMPLES_PER_FRAME);
    for i in 0..SAMPLES_PER_FRAME {
        let offset = HEADER_LEN + i * 12;
        samples.push(StreamSample {
            index: counter + i as u32,
            acc: read_vec(offset),
            gyro: read_vec(offset + VECTOR_STRIDE),
            mag: read_vec(offset + 2 * VECTOR_STRIDE),
        });
    }

    Ok(samples)
}

/// Reassembles two-part notification frames.
///
/// A part-2 packet with no pending first half is dropped silently (the
/// stream resynchronizes on the next type-2 packet); malformed frames are
/// counted as parse errors and skipped.
pub struct FrameAssembler {
    pending: Option<Bytes>,
    metrics: Arc<StoreMetrics>,
}

impl FrameAssembler {
    /// Create an assembler with its own metrics instance.
    pub fn new() -> Self {
        Self::with_metrics(Arc::new(StoreMetrics::new()))
    }

    /// Create an assembler sharing an existing metrics instance.
    pub fn with_metrics(metrics: Arc<StoreMetrics>) -> Self {
        Self {
            pending: None,
            metrics,
        }
    }

    /// Shared metrics reference.
    pub fn metrics(&self) -> Arc<StoreMetrics> {
        self.metrics.clone()
    }

    /// Feed one notification packet; returns decoded samples when a frame
    /// completes, an empty vector otherwise.
    pub fn push(&mut self, packet: Bytes) -> Vec<StreamSample> {
        let Some(&packet_type) = packet.first() else {
            self.metrics.record_parse_error();
            return Vec::new();
        };

        match packet_type {
            PACKET_TYPE_DATA => {
                self.pending = Some(packet);
                Vec::new()
            }
            PACKET_TYPE_DATA_PART2 => {
                let Some(first) = self.pending.take() else {
                    trace!("part-2 packet with no pending first half, dropped");
                    return Vec::new();
                };

                let mut combined = Vec::with_capacity(first.len() + packet.len());
                combined.extend_from_slice(&first);
                combined.extend_from_slice(&packet[PART2_SKIP.min(packet.len())..]);

                match decode_frame(&combined) {
                    Ok(samples) => {
                        self.metrics.record_frames(1);
                        samples
                    }
                    Err(e) => {
                        self.metrics.record_parse_error();
                        trace!(error = %e, "failed to decode stream frame");
                        Vec::new()
                    }
                }
            }
            other => {
                trace!(packet_type = other, "ignoring non-data packet");
                Vec::new()
            }
        }
    }
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Stream ingest: assembles packets and feeds decoded samples downstream
/// through a bounded channel.
pub struct StreamIngest {
    assembler: FrameAssembler,
    tx: Sender<StreamSample>,
    rx: Option<Receiver<StreamSample>>,
}

impl StreamIngest {
    /// Create an ingest with the given channel capacity.
    pub fn new(channel_capacity: usize) -> Self {
        let (tx, rx) = bounded(channel_capacity);
        Self {
            assembler: FrameAssembler::new(),
            tx,
            rx: Some(rx),
        }
    }

    /// Feed one notification packet, forwarding decoded samples.
    ///
    /// Samples that would overflow the channel are dropped newest-first and
    /// counted; the stream itself is never blocked.
    pub fn push_packet(&mut self, packet: Bytes) {
        for sample in self.assembler.push(packet) {
            match self.tx.try_send(sample) {
                Ok(()) => {}
                Err(async_channel::TrySendError::Full(_)) => {
                    self.assembler.metrics.record_dropped();
                    trace!(index = sample.index, "stream sample dropped (channel full)");
                }
                Err(async_channel::TrySendError::Closed(_)) => {
                    warn!("stream channel closed");
                    return;
                }
            }
        }
    }

    /// Get the sample stream receiver.
    ///
    /// Note: Can only be called once, subsequent calls return None.
    pub fn take_receiver(&mut self) -> Option<Receiver<StreamSample>> {
        debug!("stream receiver taken");
        self.rx.take()
    }

    /// Shared metrics reference.
    pub fn metrics(&self) -> Arc<StoreMetrics> {
        self.assembler.metrics()
    }
}
