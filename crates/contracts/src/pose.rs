//! PoseSource trait - pose estimator abstraction
//!
//! The pose estimator is an external collaborator: a black box producing a
//! list of named, scored 2D points per frame, or nothing when no result
//! arrives in time. The sync core only reads scores and presence.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One estimated keypoint in image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Body-part name, e.g. "left_wrist"
    pub name: String,

    /// Horizontal position (pixels)
    pub x: f64,

    /// Vertical position (pixels)
    pub y: f64,

    /// Estimator confidence, `[0, 1]`
    pub score: f64,
}

/// One raw video frame handed to the estimator.
#[derive(Debug, Clone)]
pub struct FrameImage {
    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Raw pixel data (zero-copy)
    pub data: Bytes,
}

/// Pose estimator interface.
///
/// Zero or one result is requested per call; `None` means the estimator had
/// no result ready for this frame, which callers treat as a skipped frame,
/// not an error.
pub trait PoseSource: Send {
    /// Estimate keypoints for one frame.
    fn estimate(&mut self, frame: &FrameImage) -> Option<Vec<Keypoint>>;
}

/// Mean confidence over a keypoint list; 0 when empty.
pub fn mean_score(keypoints: &[Keypoint]) -> f64 {
    if keypoints.is_empty() {
        return 0.0;
    }
    keypoints.iter().map(|k| k.score).sum::<f64>() / keypoints.len() as f64
}
