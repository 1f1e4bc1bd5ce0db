//! Monotonic time sources used by the countdown engine.

use tokio::time::Instant;

/// Source of monotonic milliseconds.
///
/// Implementations must never go backwards; wall-clock adjustments must not
/// affect the returned values.
pub trait TimeSource: Send + Sync {
    /// Milliseconds elapsed since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;
}

/// [`TimeSource`] backed by the Tokio clock.
///
/// Tokio's clock is monotonic and honours `tokio::time::pause`, so tests can
/// drive countdowns deterministically through the same code path.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    /// Anchor a new clock at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for TokioClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
