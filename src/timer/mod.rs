//! Countdown engine shared by the game clock and the shot clock.

pub mod clock;
/// Drift-free countdown timer.
pub mod countdown;

pub use self::clock::{TimeSource, TokioClock};
pub use self::countdown::{CountdownTimer, DEFAULT_TICK_INTERVAL, ExpiryHook};
