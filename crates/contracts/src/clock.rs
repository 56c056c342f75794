//! Clock display formatting
//!
//! Pure formatting helpers for timeline positions. Seconds in, display
//! strings out; no state.

/// Format seconds as a `MM:SS` clock label.
///
/// Negative inputs clamp to `00:00`; minutes grow past two digits as needed.
///
/// ```
/// # use contracts::format_clock;
/// assert_eq!(format_clock(0.0), "00:00");
/// assert_eq!(format_clock(75.4), "01:15");
/// ```
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format seconds with fixed millisecond precision, for logs and reports.
pub fn format_secs(seconds: f64) -> String {
    format!("{seconds:.3}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(59.999), "00:59");
        assert_eq!(format_clock(60.0), "01:00");
        assert_eq!(format_clock(3725.0), "62:05");
    }

    #[test]
    fn test_format_clock_degenerate_inputs() {
        assert_eq!(format_clock(-3.0), "00:00");
        assert_eq!(format_clock(f64::NAN), "00:00");
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(1.5), "1.500");
        assert_eq!(format_secs(-1.25), "-1.250");
    }
}
