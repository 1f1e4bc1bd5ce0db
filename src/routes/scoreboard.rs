use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use axum_valid::Valid;

use crate::{
    dto::scoreboard::{
        AddScoreRequest, BuzzerAckResponse, GameTimeRequest, GameTimeResponse, ScoreboardResponse,
        ShotClockResetRequest,
    },
    services::scoreboard_service,
    state::{ClockKind, ScoreState, SharedState, Team},
};

/// Routes driving scores, clocks, buzzers and the game time dialog.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/scoreboard", get(get_scoreboard))
        .route("/score/{team}/add", post(add_score))
        .route("/score/{team}/undo", post(undo_score))
        .route("/score/reset", post(reset_scores))
        .route("/clock/game/toggle", post(toggle_game_clock))
        .route("/clock/game/reset", post(reset_game_clock))
        .route("/clock/game/time", put(set_game_time))
        .route("/clock/shot/toggle", post(toggle_shot_clock))
        .route("/clock/shot/reset", post(reset_shot_clock))
        .route("/buzzer/{clock}/ack", post(acknowledge_buzzer))
        .route("/dialog/game-time/open", post(open_game_time_dialog))
        .route("/dialog/game-time/close", post(close_game_time_dialog))
}

/// Return scores, both clocks and pending buzzers.
#[utoipa::path(
    get,
    path = "/scoreboard",
    tag = "score",
    responses((status = 200, description = "Current scoreboard", body = ScoreboardResponse))
)]
pub async fn get_scoreboard(State(state): State<SharedState>) -> Json<ScoreboardResponse> {
    Json(scoreboard_service::snapshot(&state))
}

/// Credit points to a team.
#[utoipa::path(
    post,
    path = "/score/{team}/add",
    tag = "score",
    params(("team" = Team, Path, description = "Team receiving the points")),
    request_body = AddScoreRequest,
    responses(
        (status = 200, description = "Updated scores", body = ScoreState),
        (status = 400, description = "Points must be at least 1")
    )
)]
pub async fn add_score(
    State(state): State<SharedState>,
    Path(team): Path<Team>,
    Valid(Json(payload)): Valid<Json<AddScoreRequest>>,
) -> Json<ScoreState> {
    Json(scoreboard_service::add_score(&state, team, payload).await)
}

/// Take back one point from a team.
#[utoipa::path(
    post,
    path = "/score/{team}/undo",
    tag = "score",
    params(("team" = Team, Path, description = "Team losing a point")),
    responses((status = 200, description = "Updated scores", body = ScoreState))
)]
pub async fn undo_score(
    State(state): State<SharedState>,
    Path(team): Path<Team>,
) -> Json<ScoreState> {
    Json(scoreboard_service::undo_score(&state, team).await)
}

/// Set both scores back to zero.
#[utoipa::path(
    post,
    path = "/score/reset",
    tag = "score",
    responses((status = 200, description = "Scores cleared", body = ScoreState))
)]
pub async fn reset_scores(State(state): State<SharedState>) -> Json<ScoreState> {
    Json(scoreboard_service::reset_scores(&state).await)
}

/// Start or pause the game clock; pausing also pauses the shot clock.
#[utoipa::path(
    post,
    path = "/clock/game/toggle",
    tag = "clock",
    responses((status = 200, description = "Scoreboard after the toggle", body = ScoreboardResponse))
)]
pub async fn toggle_game_clock(State(state): State<SharedState>) -> Json<ScoreboardResponse> {
    Json(scoreboard_service::toggle_game_clock(&state).await)
}

/// Stop the game clock and restore the last configured game time.
#[utoipa::path(
    post,
    path = "/clock/game/reset",
    tag = "clock",
    responses((status = 200, description = "Scoreboard after the reset", body = ScoreboardResponse))
)]
pub async fn reset_game_clock(State(state): State<SharedState>) -> Json<ScoreboardResponse> {
    Json(scoreboard_service::reset_game_clock(&state).await)
}

/// Set the game clock from the dialog entry.
#[utoipa::path(
    put,
    path = "/clock/game/time",
    tag = "clock",
    request_body = GameTimeRequest,
    responses((status = 200, description = "Whether the time was accepted", body = GameTimeResponse))
)]
pub async fn set_game_time(
    State(state): State<SharedState>,
    Json(payload): Json<GameTimeRequest>,
) -> Json<GameTimeResponse> {
    Json(scoreboard_service::set_game_time(&state, payload).await)
}

/// Start or pause the shot clock.
#[utoipa::path(
    post,
    path = "/clock/shot/toggle",
    tag = "clock",
    responses((status = 200, description = "Scoreboard after the toggle", body = ScoreboardResponse))
)]
pub async fn toggle_shot_clock(State(state): State<SharedState>) -> Json<ScoreboardResponse> {
    Json(scoreboard_service::toggle_shot_clock(&state).await)
}

/// Stop the shot clock and load a new possession.
#[utoipa::path(
    post,
    path = "/clock/shot/reset",
    tag = "clock",
    request_body = ShotClockResetRequest,
    responses(
        (status = 200, description = "Scoreboard after the reset", body = ScoreboardResponse),
        (status = 400, description = "Seconds must be at least 1")
    )
)]
pub async fn reset_shot_clock(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<ShotClockResetRequest>>,
) -> Json<ScoreboardResponse> {
    Json(scoreboard_service::reset_shot_clock(&state, payload).await)
}

/// Acknowledge a pending buzzer.
#[utoipa::path(
    post,
    path = "/buzzer/{clock}/ack",
    tag = "clock",
    params(("clock" = ClockKind, Path, description = "Clock whose buzzer was played")),
    responses((status = 200, description = "Whether a buzzer was pending", body = BuzzerAckResponse))
)]
pub async fn acknowledge_buzzer(
    State(state): State<SharedState>,
    Path(clock): Path<ClockKind>,
) -> Json<BuzzerAckResponse> {
    Json(scoreboard_service::acknowledge_buzzer(&state, clock))
}

/// Show the game time dialog.
#[utoipa::path(
    post,
    path = "/dialog/game-time/open",
    tag = "clock",
    responses((status = 200, description = "Dialog shown", body = ScoreboardResponse))
)]
pub async fn open_game_time_dialog(State(state): State<SharedState>) -> Json<ScoreboardResponse> {
    Json(scoreboard_service::open_game_time_dialog(&state))
}

/// Hide the game time dialog without changing the clock.
#[utoipa::path(
    post,
    path = "/dialog/game-time/close",
    tag = "clock",
    responses((status = 200, description = "Dialog hidden", body = ScoreboardResponse))
)]
pub async fn close_game_time_dialog(State(state): State<SharedState>) -> Json<ScoreboardResponse> {
    Json(scoreboard_service::close_game_time_dialog(&state))
}
