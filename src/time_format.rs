//! Human-readable countdown formatting.
//!
//! Remaining time renders as `HH:MM:SS` once a full hour is left and `MM:SS`
//! below that. Units truncate toward zero; negative input (an already expired
//! timer) clamps to zero rather than producing negative fields.

/// Format remaining seconds as `HH:MM:SS`, or `MM:SS` under an hour.
pub fn clock(seconds: f64) -> String {
    let total = seconds.max(0.0).trunc() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Format remaining seconds with a `.mmm` milliseconds suffix.
///
/// Milliseconds come from the sub-second fraction of the raw value, not from
/// the already-truncated seconds field.
pub fn clock_millis(seconds: f64) -> String {
    // work in whole milliseconds; the raw value is ms-resolution at best
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    format!("{}.{:03}", clock((total_ms / 1000) as f64), total_ms % 1000)
}
