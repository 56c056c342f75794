//! Timeline - clamped playhead state for one of the two clocks
//!
//! The video and data timelines are independent entities. Neither mutates
//! the other; translation between them only happens through the explicit
//! sync offset.

use serde::{Deserialize, Serialize};

/// Which of the two timelines a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    Video,
    Data,
}

/// A playhead position bounded by a duration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Timeline {
    current: f64,
    duration: f64,
}

impl Timeline {
    /// Create a timeline of the given duration, playhead at 0.
    pub fn new(duration: f64) -> Self {
        Self {
            current: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Current playhead position (seconds).
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Timeline duration (seconds).
    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Move the playhead, clamped to `[0, duration]`. Returns the position
    /// actually taken.
    pub fn seek(&mut self, time: f64) -> f64 {
        self.current = time.clamp(0.0, self.duration);
        self.current
    }

    /// Replace the duration, re-clamping the playhead into the new range.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
        self.current = self.current.clamp(0.0, self.duration);
    }

    /// Whether the playhead sits at the end of the timeline.
    pub fn at_end(&self) -> bool {
        self.duration > 0.0 && self.current >= self.duration
    }
}

/// Discretized step readout shown alongside the raw video time.
///
/// The index is `round(time * step_rate)`, clamped to the total step count
/// for the current duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepCounter {
    step_rate_hz: f64,
}

impl StepCounter {
    /// Create a counter at the given fixed step rate.
    pub fn new(step_rate_hz: f64) -> Self {
        Self {
            step_rate_hz: step_rate_hz.max(0.0),
        }
    }

    /// Fixed step rate (steps per second).
    pub fn step_rate_hz(&self) -> f64 {
        self.step_rate_hz
    }

    /// Total step count for a timeline of `duration` seconds.
    pub fn total_steps(&self, duration: f64) -> u64 {
        (duration.max(0.0) * self.step_rate_hz).round() as u64
    }

    /// Step index for `time` on a timeline of `duration` seconds.
    pub fn index(&self, time: f64, duration: f64) -> u64 {
        let raw = (time.max(0.0) * self.step_rate_hz).round() as u64;
        raw.min(self.total_steps(duration))
    }
}
