use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    domain::clock_format,
    state::{ClockKind, ClockStatus, ScoreState, ScoreboardSnapshot},
};

/// Clock state as rendered on the board.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClockSnapshot {
    /// Remaining time in milliseconds.
    pub remaining_ms: u64,
    /// Whether the clock is counting down.
    pub running: bool,
    /// Remaining time formatted for display (`m:ss`, `ss` or `s.t`).
    pub display: String,
    /// Buzzer raised by the last expiry and not yet acknowledged.
    pub buzzer_pending: bool,
}

impl ClockSnapshot {
    fn new(kind: ClockKind, status: ClockStatus, buzzer_pending: bool) -> Self {
        let display = match kind {
            ClockKind::Game => clock_format::game_clock(status.remaining_ms),
            ClockKind::Shot => clock_format::shot_clock(status.remaining_ms),
        };
        Self {
            remaining_ms: status.remaining_ms,
            running: status.running,
            display,
            buzzer_pending,
        }
    }
}

/// Full scoreboard state returned by `GET /scoreboard`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreboardResponse {
    /// Team scores.
    pub score: ScoreState,
    /// Period clock.
    pub game_clock: ClockSnapshot,
    /// Possession clock.
    pub shot_clock: ClockSnapshot,
    /// Whether the "set game time" dialog is shown.
    pub game_time_dialog_open: bool,
}

impl From<ScoreboardSnapshot> for ScoreboardResponse {
    fn from(snapshot: ScoreboardSnapshot) -> Self {
        Self {
            score: snapshot.score,
            game_clock: ClockSnapshot::new(ClockKind::Game, snapshot.game, snapshot.game_buzzer),
            shot_clock: ClockSnapshot::new(ClockKind::Shot, snapshot.shot, snapshot.shot_buzzer),
            game_time_dialog_open: snapshot.game_time_dialog_open,
        }
    }
}

/// Points credited to a team in one scoring play.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddScoreRequest {
    /// Points to add; at least 1.
    #[validate(range(min = 1))]
    pub points: u32,
}

/// New possession length for the shot clock.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ShotClockResetRequest {
    /// Possession length in seconds; at least 1.
    #[validate(range(min = 1))]
    pub seconds: u32,
}

/// Game time typed by the operator. Out-of-range values are reported through
/// [`GameTimeResponse::applied`] rather than rejected.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GameTimeRequest {
    /// Whole minutes, 0 to 60.
    pub minutes: i32,
    /// Seconds within the minute, 0 to 59.
    pub seconds: i32,
}

/// Outcome of a game time update.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameTimeResponse {
    /// Whether the value was valid and the game clock was set.
    pub applied: bool,
}

/// Outcome of a buzzer acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct BuzzerAckResponse {
    /// Whether a pending buzzer was cleared by this call.
    pub cleared: bool,
}
