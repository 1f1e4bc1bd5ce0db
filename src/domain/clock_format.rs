//! Text rendering of clock values as shown on the scoreboard.

/// Below this many milliseconds both clocks switch to tenths of a second.
const TENTHS_THRESHOLD_MS: u64 = 10_000;

/// Game clock text: `m:ss`, or `s.t` during the last ten seconds.
pub fn game_clock(remaining_ms: u64) -> String {
    if remaining_ms >= TENTHS_THRESHOLD_MS {
        let total_seconds = remaining_ms / 1_000;
        format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
    } else {
        tenths(remaining_ms)
    }
}

/// Shot clock text: two-digit seconds, or `s.t` during the last ten seconds.
pub fn shot_clock(remaining_ms: u64) -> String {
    if remaining_ms >= TENTHS_THRESHOLD_MS {
        format!("{:02}", remaining_ms / 1_000)
    } else {
        tenths(remaining_ms)
    }
}

fn tenths(remaining_ms: u64) -> String {
    format!("{}.{}", remaining_ms / 1_000, (remaining_ms % 1_000) / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_clock_uses_minutes_above_ten_seconds() {
        assert_eq!(game_clock(600_000), "10:00");
        assert_eq!(game_clock(65_999), "1:05");
        assert_eq!(game_clock(10_000), "0:10");
    }

    #[test]
    fn game_clock_switches_to_tenths() {
        assert_eq!(game_clock(9_999), "9.9");
        assert_eq!(game_clock(4_230), "4.2");
        assert_eq!(game_clock(0), "0.0");
    }

    #[test]
    fn shot_clock_formats() {
        assert_eq!(shot_clock(24_000), "24");
        assert_eq!(shot_clock(14_500), "14");
        assert_eq!(shot_clock(9_050), "9.0");
    }
}
