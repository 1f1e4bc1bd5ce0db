use tracing::debug;

use crate::{
    dto::scoreboard::{
        AddScoreRequest, BuzzerAckResponse, GameTimeRequest, GameTimeResponse, ScoreboardResponse,
        ShotClockResetRequest,
    },
    state::{ClockKind, ScoreState, SharedState, Team},
};

/// Full scoreboard as rendered by the presentation layer.
pub fn snapshot(state: &SharedState) -> ScoreboardResponse {
    state.controller().snapshot().into()
}

/// Credit the requested points to `team`.
pub async fn add_score(state: &SharedState, team: Team, request: AddScoreRequest) -> ScoreState {
    state.controller().add_score(team, request.points).await
}

/// Take one point back from `team`.
pub async fn undo_score(state: &SharedState, team: Team) -> ScoreState {
    state.controller().undo_score(team).await
}

/// Zero both scores.
pub async fn reset_scores(state: &SharedState) -> ScoreState {
    state.controller().reset_scores().await
}

/// Start or pause the game clock; pausing also pauses the shot clock.
pub async fn toggle_game_clock(state: &SharedState) -> ScoreboardResponse {
    state.controller().toggle_game_clock().await;
    snapshot(state)
}

/// Stop the game clock at its last configured duration.
pub async fn reset_game_clock(state: &SharedState) -> ScoreboardResponse {
    state.controller().reset_game_clock().await;
    snapshot(state)
}

/// Start or pause the shot clock.
pub async fn toggle_shot_clock(state: &SharedState) -> ScoreboardResponse {
    state.controller().toggle_shot_clock().await;
    snapshot(state)
}

/// Load a new possession on the shot clock.
pub async fn reset_shot_clock(
    state: &SharedState,
    request: ShotClockResetRequest,
) -> ScoreboardResponse {
    state.controller().reset_shot_clock(request.seconds).await;
    snapshot(state)
}

/// Apply the game time typed in the dialog. The dialog closes only when the
/// value was accepted so the operator can correct a rejected entry.
pub async fn set_game_time(state: &SharedState, request: GameTimeRequest) -> GameTimeResponse {
    let controller = state.controller();
    let applied = controller
        .set_game_time_if_valid(request.minutes, request.seconds)
        .await;
    if applied {
        controller.close_game_time_dialog();
    } else {
        debug!(
            minutes = request.minutes,
            seconds = request.seconds,
            "game time left unchanged"
        );
    }
    GameTimeResponse { applied }
}

/// Clear a pending buzzer after the client played it.
pub fn acknowledge_buzzer(state: &SharedState, clock: ClockKind) -> BuzzerAckResponse {
    BuzzerAckResponse {
        cleared: state.controller().consume_buzzer(clock),
    }
}

/// Show the "set game time" dialog.
pub fn open_game_time_dialog(state: &SharedState) -> ScoreboardResponse {
    state.controller().open_game_time_dialog();
    snapshot(state)
}

/// Hide the "set game time" dialog without changing the clock.
pub fn close_game_time_dialog(state: &SharedState) -> ScoreboardResponse {
    state.controller().close_game_time_dialog();
    snapshot(state)
}
