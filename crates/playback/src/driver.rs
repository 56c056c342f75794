//! Playback driver state machine.
//!
//! Two states, Stopped and Playing. Each tick advances the playhead by
//! `elapsed * rate`; reaching the dataset duration clamps, scrubs to the
//! end and stops. Manual interaction always wins over automatic playback:
//! a manual scrub while playing forces a pause so the driver and the user
//! never fight over the control.

use contracts::PlaybackConfig;
use tracing::{debug, info, trace};

/// Driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not advancing; ticks are ignored
    Stopped,
    /// Advancing on every tick
    Playing,
}

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Not playing; the tick applied no state (stale or idle tick)
    Idle,
    /// Scrub the data timeline to this time
    Advance(f64),
    /// Terminal: scrub to the dataset end; the driver has stopped
    Finished(f64),
}

/// Cooperative playback driver for the data timeline.
#[derive(Debug, Clone)]
pub struct PlaybackDriver {
    state: PlaybackState,
    rate: f64,
    duration: f64,
    step_size: f64,
    min_step_secs: f64,
}

impl PlaybackDriver {
    /// Driver with no dataset; disabled until [`set_dataset`](Self::set_dataset).
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            state: PlaybackState::Stopped,
            rate: config.default_rate,
            duration: 0.0,
            step_size: config.min_step_secs,
            min_step_secs: config.min_step_secs,
        }
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the driver is advancing.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Selected rate multiplier.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Select a playback rate; non-positive values are ignored.
    pub fn set_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.rate = rate;
        }
    }

    /// Back/forward step size: the control granularity floored to a usable
    /// minimum.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Re-check enablement against the (possibly re-loaded) dataset.
    ///
    /// `granularity` is the scrub control's step, normally one sample
    /// interval. An empty dataset disables the driver and stops playback.
    pub fn set_dataset(&mut self, duration: f64, granularity: f64) {
        self.duration = duration.max(0.0);
        self.step_size = granularity.max(self.min_step_secs);
        if self.duration <= 0.0 {
            self.pause();
        }
        debug!(
            duration = self.duration,
            step = self.step_size,
            "playback dataset updated"
        );
    }

    /// Whether playback can start (non-empty dataset, positive duration).
    pub fn is_enabled(&self) -> bool {
        self.duration > 0.0
    }

    /// Transition to Playing. Refused (returns false) without a dataset.
    pub fn play(&mut self) -> bool {
        if !self.is_enabled() {
            debug!("play refused: no dataset");
            return false;
        }
        if self.state != PlaybackState::Playing {
            info!(rate = self.rate, "playback started");
            metrics::counter!("motion_review_playback_started_total").increment(1);
        }
        self.state = PlaybackState::Playing;
        true
    }

    /// Transition to Stopped. Idempotent.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            info!("playback paused");
        }
        self.state = PlaybackState::Stopped;
    }

    /// One cooperative tick with the current playhead position and the
    /// elapsed seconds since the previous tick.
    ///
    /// The running flag is checked at entry: a tick arriving after a pause
    /// or dataset switch applies no state. Reaching or passing the duration
    /// clamps to it exactly and transitions back to Stopped.
    pub fn tick(&mut self, current: f64, elapsed: f64) -> Tick {
        if self.state != PlaybackState::Playing {
            return Tick::Idle;
        }

        let next = current + elapsed.max(0.0) * self.rate;
        metrics::counter!("motion_review_playback_ticks_total").increment(1);

        if next >= self.duration {
            self.state = PlaybackState::Stopped;
            info!(duration = self.duration, "playback reached dataset end");
            return Tick::Finished(self.duration);
        }

        trace!(current, next, "playback tick");
        Tick::Advance(next)
    }

    /// Note a manual scrub of the data control. Pauses if playing; returns
    /// whether playback was preempted.
    pub fn on_manual_scrub(&mut self) -> bool {
        if self.is_playing() {
            debug!("manual scrub preempts playback");
            self.pause();
            true
        } else {
            false
        }
    }

    /// Pause and return the scrub target one step backward.
    pub fn back(&mut self, current: f64) -> f64 {
        self.pause();
        (current - self.step_size).max(0.0)
    }

    /// Pause and return the scrub target one step forward.
    pub fn forward(&mut self, current: f64) -> f64 {
        self.pause();
        current + self.step_size
    }
}
