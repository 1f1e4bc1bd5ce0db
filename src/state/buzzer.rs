use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use utoipa::ToSchema;

/// Identifies one of the two countdowns on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    /// Period clock.
    Game,
    /// Possession clock.
    Shot,
}

impl ClockKind {
    /// Name used in logs and event payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            ClockKind::Game => "game",
            ClockKind::Shot => "shot",
        }
    }
}

/// Pending buzzer notification for a clock, raised on expiry and cleared by the consumer.
///
/// Raising an already raised flag does not notify subscribers again.
pub struct BuzzerFlag {
    raised: watch::Sender<bool>,
}

impl BuzzerFlag {
    /// Create a cleared flag.
    pub fn new() -> Self {
        let (raised, _) = watch::channel(false);
        Self { raised }
    }

    /// Whether a buzz is waiting to be played.
    pub fn is_raised(&self) -> bool {
        *self.raised.borrow()
    }

    /// Subscribe to flag changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.raised.subscribe()
    }

    /// Mark a buzz as pending.
    pub fn raise(&self) {
        self.raised.send_if_modified(|raised| !std::mem::replace(raised, true));
    }

    /// Clear the flag; returns whether a buzz was pending.
    pub fn consume(&self) -> bool {
        self.raised.send_if_modified(|raised| std::mem::replace(raised, false))
    }
}

impl Default for BuzzerFlag {
    fn default() -> Self {
        Self::new()
    }
}
