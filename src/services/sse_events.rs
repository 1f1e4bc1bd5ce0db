use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    dto::{
        scoreboard::ScoreboardResponse,
        sse::{BuzzerEvent, BuzzerPlayedEvent, ClockEvent, DialogEvent, ServerEvent},
    },
    state::{ClockKind, ScoreState, SharedState},
};

const EVENT_SCORE: &str = "score";
const EVENT_CLOCK: &str = "clock";
const EVENT_BUZZER: &str = "buzzer";
const EVENT_BUZZER_PLAYED: &str = "buzzer.played";
const EVENT_DIALOG: &str = "dialog";
/// Name of the full-state event sent to a client when it connects.
pub const EVENT_SCOREBOARD: &str = "scoreboard";

/// Broadcast the current scores.
pub fn broadcast_score(state: &SharedState, score: ScoreState) {
    send_public_event(state, EVENT_SCORE, &score);
}

/// Broadcast the current remaining time and running flag of one clock.
pub fn broadcast_clock(state: &SharedState, kind: ClockKind) {
    let status = state.controller().clock_status(kind);
    let payload = ClockEvent::new(kind, status.remaining_ms, status.running);
    send_public_event(state, EVENT_CLOCK, &payload);
}

/// Broadcast whether the buzzer of `kind` is waiting to be played.
pub fn broadcast_buzzer(state: &SharedState, kind: ClockKind, pending: bool) {
    let payload = BuzzerEvent {
        clock: kind,
        pending,
    };
    send_public_event(state, EVENT_BUZZER, &payload);
}

/// Broadcast that the server played the buzzer of `kind`.
pub fn broadcast_buzzer_played(state: &SharedState, kind: ClockKind) {
    send_public_event(state, EVENT_BUZZER_PLAYED, &BuzzerPlayedEvent { clock: kind });
}

/// Broadcast the visibility of the "set game time" dialog.
pub fn broadcast_dialog(state: &SharedState, open: bool) {
    send_public_event(state, EVENT_DIALOG, &DialogEvent { open });
}

/// Full scoreboard snapshot as an event, for clients that just connected.
pub fn scoreboard_event(state: &SharedState) -> Option<ServerEvent> {
    let payload = ScoreboardResponse::from(state.controller().snapshot());
    match ServerEvent::json(Some(EVENT_SCOREBOARD.to_string()), &payload) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(error = %err, "failed to serialize scoreboard snapshot");
            None
        }
    }
}

/// Forward every controller observable to the public SSE hub until the
/// controller's channels close.
pub async fn run_publisher(state: SharedState) {
    let controller = state.controller();
    let mut score = controller.subscribe_score();
    let (mut game_remaining, mut game_running) = controller.subscribe_clock(ClockKind::Game);
    let (mut shot_remaining, mut shot_running) = controller.subscribe_clock(ClockKind::Shot);
    let mut game_buzzer = controller.subscribe_buzzer(ClockKind::Game);
    let mut shot_buzzer = controller.subscribe_buzzer(ClockKind::Shot);
    let mut dialog = controller.subscribe_game_time_dialog();

    debug!("state publisher started");
    loop {
        tokio::select! {
            Ok(()) = score.changed() => {
                let value = *score.borrow_and_update();
                broadcast_score(&state, value);
            }
            Ok(()) = game_remaining.changed() => {
                broadcast_clock(&state, ClockKind::Game);
            }
            Ok(()) = game_running.changed() => {
                broadcast_clock(&state, ClockKind::Game);
            }
            Ok(()) = shot_remaining.changed() => {
                broadcast_clock(&state, ClockKind::Shot);
            }
            Ok(()) = shot_running.changed() => {
                broadcast_clock(&state, ClockKind::Shot);
            }
            Ok(()) = game_buzzer.changed() => {
                let pending = *game_buzzer.borrow_and_update();
                broadcast_buzzer(&state, ClockKind::Game, pending);
            }
            Ok(()) = shot_buzzer.changed() => {
                let pending = *shot_buzzer.borrow_and_update();
                broadcast_buzzer(&state, ClockKind::Shot, pending);
            }
            Ok(()) = dialog.changed() => {
                let open = *dialog.borrow_and_update();
                broadcast_dialog(&state, open);
            }
            else => break,
        }
    }
    debug!("state publisher stopped");
}

fn send_public_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.public_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize public SSE payload"),
    }
}
