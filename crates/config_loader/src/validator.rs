//! Configuration validation
//!
//! Rules:
//! - sample_rate_hz and step_rate_hz are positive finite numbers
//! - playback default_rate > 0, min_step_secs >= 0
//! - every chart group names exactly three channels
//! - no channel appears in more than one group
//! - chart names are unique and non-empty

use std::collections::HashSet;

use contracts::{ReviewError, SessionConfig};

/// Validate a SessionConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &SessionConfig) -> Result<(), ReviewError> {
    validate_rates(config)?;
    validate_playback(config)?;
    validate_chart_shape(config)?;
    validate_chart_channels(config)?;
    Ok(())
}

fn validate_rates(config: &SessionConfig) -> Result<(), ReviewError> {
    if !(config.sample_rate_hz.is_finite() && config.sample_rate_hz > 0.0) {
        return Err(ReviewError::config_validation(
            "sample_rate_hz",
            format!("must be a positive number, got {}", config.sample_rate_hz),
        ));
    }
    if !(config.step_rate_hz.is_finite() && config.step_rate_hz > 0.0) {
        return Err(ReviewError::config_validation(
            "step_rate_hz",
            format!("must be a positive number, got {}", config.step_rate_hz),
        ));
    }
    Ok(())
}

fn validate_playback(config: &SessionConfig) -> Result<(), ReviewError> {
    let playback = &config.playback;
    if !(playback.default_rate.is_finite() && playback.default_rate > 0.0) {
        return Err(ReviewError::config_validation(
            "playback.default_rate",
            format!("must be a positive number, got {}", playback.default_rate),
        ));
    }
    if !(playback.min_step_secs.is_finite() && playback.min_step_secs >= 0.0) {
        return Err(ReviewError::config_validation(
            "playback.min_step_secs",
            format!("must be >= 0, got {}", playback.min_step_secs),
        ));
    }
    Ok(())
}

/// Each group must name exactly three channels and a non-empty, unique name.
fn validate_chart_shape(config: &SessionConfig) -> Result<(), ReviewError> {
    let mut names = HashSet::new();
    for (idx, chart) in config.charts.iter().enumerate() {
        if chart.name.is_empty() {
            return Err(ReviewError::config_validation(
                format!("charts[{idx}].name"),
                "chart name cannot be empty",
            ));
        }
        if !names.insert(&chart.name) {
            return Err(ReviewError::config_validation(
                format!("charts[{idx}].name"),
                format!("duplicate chart name '{}'", chart.name),
            ));
        }
        if chart.channels.len() != 3 {
            return Err(ReviewError::config_validation(
                format!("charts[name={}].channels", chart.name),
                format!("expected exactly 3 channels, got {}", chart.channels.len()),
            ));
        }
    }
    Ok(())
}

/// A channel mapped onto two charts would double-render; reject it.
fn validate_chart_channels(config: &SessionConfig) -> Result<(), ReviewError> {
    let mut seen = HashSet::new();
    for chart in &config.charts {
        for channel in &chart.channels {
            if channel.is_empty() {
                return Err(ReviewError::config_validation(
                    format!("charts[name={}].channels", chart.name),
                    "channel name cannot be empty",
                ));
            }
            if !seen.insert(channel) {
                return Err(ReviewError::config_validation(
                    format!("charts[name={}].channels", chart.name),
                    format!("duplicate channel '{channel}'"),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ChartMapping;

    fn config_with_charts(charts: Vec<(&str, Vec<&str>)>) -> SessionConfig {
        SessionConfig {
            charts: charts
                .into_iter()
                .map(|(name, channels)| ChartMapping {
                    name: name.to_string(),
                    channels: channels.into_iter().map(String::from).collect(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&SessionConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        let config = SessionConfig {
            sample_rate_hz: 0.0,
            ..Default::default()
        };
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("sample_rate_hz"));
    }

    #[test]
    fn test_rejects_negative_default_rate() {
        let mut config = SessionConfig::default();
        config.playback.default_rate = -1.0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_wrong_channel_count() {
        let config = config_with_charts(vec![("Accelerometer", vec!["ax", "ay"])]);
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("exactly 3"));
    }

    #[test]
    fn test_rejects_duplicate_channel_across_groups() {
        let config = config_with_charts(vec![
            ("A", vec!["ax", "ay", "az"]),
            ("B", vec!["ax", "gy", "gz"]),
        ]);
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("duplicate channel"));
    }

    #[test]
    fn test_rejects_duplicate_chart_name() {
        let config = config_with_charts(vec![
            ("Same", vec!["ax", "ay", "az"]),
            ("Same", vec!["gx", "gy", "gz"]),
        ]);
        assert!(validate(&config).is_err());
    }
}
