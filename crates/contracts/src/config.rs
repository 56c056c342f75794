//! SessionConfig - Config Loader output
//!
//! Describes one review session setup: dataset sample rate, the video step
//! counter rate, playback behavior and the chart channel mapping. Every
//! field has a default, so an empty config file is valid.

use serde::{Deserialize, Serialize};

use crate::channel::headers;
use crate::{ChannelGroup, ChannelId};

/// Config schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete review-session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Config schema version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Dataset sample rate (Hz). Fixed for the life of one loaded dataset.
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: f64,

    /// Video step counter rate (steps per second)
    #[serde(default = "default_step_rate_hz")]
    pub step_rate_hz: f64,

    /// Playback behavior
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Chart channel mapping (three groups of three channels)
    #[serde(default = "default_chart_mappings")]
    pub charts: Vec<ChartMapping>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            version: ConfigVersion::V1,
            sample_rate_hz: default_sample_rate_hz(),
            step_rate_hz: default_step_rate_hz(),
            playback: PlaybackConfig::default(),
            charts: default_chart_mappings(),
        }
    }
}

impl SessionConfig {
    /// Resolve the chart mapping into channel groups for the updater.
    pub fn channel_groups(&self) -> Vec<ChannelGroup> {
        self.charts.iter().map(ChartMapping::to_group).collect()
    }
}

fn default_sample_rate_hz() -> f64 {
    // IMU9 streams at 104 Hz.
    104.0
}

fn default_step_rate_hz() -> f64 {
    30.0
}

/// IMU playback driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Rate multiplier used when none is selected (1.0 = real time)
    pub default_rate: f64,

    /// Floor for the back/forward step size (seconds)
    pub min_step_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_rate: 1.0,
            min_step_secs: 0.1,
        }
    }
}

/// One chart's channel assignment as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMapping {
    /// Chart display name
    pub name: String,

    /// Channel names; validation requires exactly three
    pub channels: Vec<String>,
}

impl ChartMapping {
    /// Convert to a [`ChannelGroup`]; callers must have validated the
    /// three-channel shape first (missing slots become empty channels).
    pub fn to_group(&self) -> ChannelGroup {
        let mut channels: [ChannelId; 3] = Default::default();
        for (slot, name) in channels.iter_mut().zip(self.channels.iter()) {
            *slot = ChannelId::new(name);
        }
        ChannelGroup {
            name: self.name.clone(),
            channels,
        }
    }
}

fn default_chart_mappings() -> Vec<ChartMapping> {
    let group = |name: &str, channels: [&str; 3]| ChartMapping {
        name: name.to_string(),
        channels: channels.iter().map(|c| c.to_string()).collect(),
    };
    vec![
        group("Accelerometer", headers::ACCELEROMETER),
        group("Gyroscope", headers::GYROSCOPE),
        group("Magnetometer", headers::MAGNETOMETER),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.sample_rate_hz, 104.0);
        assert_eq!(config.step_rate_hz, 30.0);
        assert_eq!(config.playback.default_rate, 1.0);
        assert_eq!(config.charts.len(), 3);
    }

    #[test]
    fn test_channel_groups_resolution() {
        let config = SessionConfig::default();
        let groups = config.channel_groups();
        assert_eq!(groups[1].channels[0], "gx");
    }

    #[test]
    fn test_empty_json_is_valid() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }
}
