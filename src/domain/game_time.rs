//! Validation of user-supplied game clock durations.

/// Longest game clock duration that can be configured (60:00).
pub const MAX_GAME_TIME_MS: u64 = 60 * 60_000;

/// Return whether `minutes:seconds` is an acceptable game clock duration.
///
/// Minutes must be within `0..=60`, seconds within `0..=59`, and the total must be
/// non-zero and no longer than [`MAX_GAME_TIME_MS`]. Negative inputs are rejected.
pub fn is_valid(minutes: i32, seconds: i32) -> bool {
    to_millis(minutes, seconds).is_some()
}

/// Convert `minutes:seconds` into milliseconds when [`is_valid`] accepts it.
pub fn to_millis(minutes: i32, seconds: i32) -> Option<u64> {
    if !(0..=60).contains(&minutes) || !(0..=59).contains(&seconds) {
        return None;
    }

    let total_ms = (i64::from(minutes) * 60 + i64::from(seconds)) * 1_000;
    let total_ms = u64::try_from(total_ms).ok()?;

    (total_ms > 0 && total_ms <= MAX_GAME_TIME_MS).then_some(total_ms)
}
