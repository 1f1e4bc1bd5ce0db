use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{domain::clock_format, state::ClockKind};

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    /// SSE `event:` name; unnamed events use the default `message` type.
    pub event: Option<String>,
    /// JSON-encoded payload.
    pub data: String,
}

impl ServerEvent {
    /// Build an event from an optional name and a raw data field.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Identifier of the SSE stream.
    pub stream: String,
    /// Human-readable message confirming the subscription.
    pub message: String,
    /// Scoreboard session served by this process; changes on restart.
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
/// Broadcast whenever a clock's remaining time or running flag changes.
pub struct ClockEvent {
    /// Which clock changed.
    pub clock: ClockKind,
    /// Remaining time in milliseconds.
    pub remaining_ms: u64,
    /// Whether the clock is counting down.
    pub running: bool,
    /// Remaining time as shown on the board.
    pub display: String,
}

impl ClockEvent {
    /// Build the event, formatting `remaining_ms` the way `clock` displays it.
    pub fn new(clock: ClockKind, remaining_ms: u64, running: bool) -> Self {
        let display = match clock {
            ClockKind::Game => clock_format::game_clock(remaining_ms),
            ClockKind::Shot => clock_format::shot_clock(remaining_ms),
        };
        Self {
            clock,
            remaining_ms,
            running,
            display,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a buzzer is raised by an expiry or acknowledged.
pub struct BuzzerEvent {
    /// Clock whose buzzer changed.
    pub clock: ClockKind,
    /// Whether the buzz is still waiting to be played.
    pub pending: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the server has played a buzzer.
pub struct BuzzerPlayedEvent {
    /// Clock that expired.
    pub clock: ClockKind,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the "set game time" dialog opens or closes.
pub struct DialogEvent {
    /// Whether the dialog is shown.
    pub open: bool,
}
