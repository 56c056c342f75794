//! Deterministic pose estimator double.
//!
//! Produces a small, smoothly moving skeleton so headless replays exercise
//! the pose interface without a model. Every third frame returns no result,
//! imitating an estimator that misses its frame budget.

use bytes::Bytes;
use contracts::{FrameImage, Keypoint, PoseSource};

const PART_NAMES: [&str; 5] = ["nose", "left_wrist", "right_wrist", "left_ankle", "right_ankle"];

/// Scripted pose source for simulations.
pub struct MockPoseSource {
    frame_index: u64,
}

impl MockPoseSource {
    /// Fresh source starting at frame 0.
    pub fn new() -> Self {
        Self { frame_index: 0 }
    }

    /// A minimal frame payload for the simulation loop.
    pub fn blank_frame(width: u32, height: u32) -> FrameImage {
        FrameImage {
            width,
            height,
            data: Bytes::from(vec![0u8; (width * height * 4) as usize]),
        }
    }
}

impl Default for MockPoseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseSource for MockPoseSource {
    fn estimate(&mut self, frame: &FrameImage) -> Option<Vec<Keypoint>> {
        let index = self.frame_index;
        self.frame_index += 1;

        if index % 3 == 2 {
            return None;
        }

        let phase = index as f64 * 0.1;
        let cx = frame.width as f64 / 2.0;
        let cy = frame.height as f64 / 2.0;

        Some(
            PART_NAMES
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let spread = (i as f64 + 1.0) * 8.0;
                    Keypoint {
                        name: name.to_string(),
                        x: cx + spread * (phase + i as f64).cos(),
                        y: cy + spread * (phase + i as f64).sin(),
                        score: 0.75 + 0.2 * (phase + i as f64).sin().abs(),
                    }
                })
                .collect(),
        )
    }
}
