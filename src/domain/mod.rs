//! Pure scoreboard rules with no runtime dependencies.

pub mod clock_format;
pub mod game_time;
