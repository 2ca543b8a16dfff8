//! Clock-style duration formatting and goal progress.

/// Seconds in the 10,000-hour goal.
pub const GOAL_SECONDS: u64 = 10_000 * 60 * 60;

/// Formats a second count as `HH:MM:SS`.
///
/// Negative input is treated as zero. Every field is padded to two digits;
/// hours grow past 99 without clamping.
pub fn format_hms(seconds: i64) -> String {
    let s = seconds.max(0);
    let h = s / 3600;
    let m = (s % 3600) / 60;
    let sec = s % 60;
    format!("{h:02}:{m:02}:{sec:02}")
}

/// Formats an unsigned second count as `HH:MM:SS`.
pub fn format_seconds(seconds: u64) -> String {
    format_hms(i64::try_from(seconds).unwrap_or(i64::MAX))
}

/// Percentage of `goal_seconds` covered by `seconds`, capped at 100.
///
/// A zero goal counts as already reached.
#[expect(
    clippy::cast_precision_loss,
    reason = "second counts stay far below 2^52"
)]
pub fn progress_percent(seconds: u64, goal_seconds: u64) -> f64 {
    if goal_seconds == 0 {
        return 100.0;
    }
    ((seconds as f64 / goal_seconds as f64) * 100.0).min(100.0)
}
