//! Display helpers for the transport bar

/// Format seconds as `m:ss`
///
/// Negative, NaN and infinite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format an optional duration, unknown renders as `0:00`
pub fn format_duration(duration: Option<f64>) -> String {
    duration.map_or_else(|| "0:00".to_string(), format_time)
}

/// Seek slider maximum; unknown or zero duration yields 1.0 so the slider stays valid
pub fn seek_slider_max(duration: Option<f64>) -> f64 {
    match duration {
        Some(d) if d > 0.0 => d,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(3725.4), "62:05");
    }

    #[test]
    fn invalid_input_renders_zero() {
        assert_eq!(format_time(-1.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn unknown_duration() {
        assert_eq!(format_duration(None), "0:00");
        assert_eq!(format_duration(Some(184.2)), "3:04");
    }

    #[test]
    fn slider_max_never_zero() {
        assert_eq!(seek_slider_max(None), 1.0);
        assert_eq!(seek_slider_max(Some(0.0)), 1.0);
        assert_eq!(seek_slider_max(Some(212.5)), 212.5);
    }
}
