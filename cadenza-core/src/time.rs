//! Playback position formatting.

/// Format a playback position in seconds as a zero-padded `"MM:SS"` string.
///
/// Negative and non-finite positions render as `"00:00"`. Minutes are not
/// clamped: positions of 100 minutes or more render with as many digits as
/// they need.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_position(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let minutes = (seconds / 60.0).floor() as u64;
    let remainder = (seconds % 60.0) as u64;

    format!("{minutes:02}:{remainder:02}")
}
