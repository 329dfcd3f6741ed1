/// Placeholder shown for any time that cannot be rendered.
pub const ZERO_TIME: &str = "0:00";

/// Format a playback time in seconds as `M:SS`.
///
/// Fractional seconds are floored. Minutes are never zero-padded and grow
/// past 59 rather than rolling into hours, so `3600.0` renders `60:00`.
/// NaN, infinite and negative inputs render as [`ZERO_TIME`].
pub fn format_time(total_seconds: f64) -> String {
    if !total_seconds.is_finite() || total_seconds < 0.0 {
        return ZERO_TIME.to_string();
    }

    let whole = total_seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
