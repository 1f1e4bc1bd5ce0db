use utoipa::OpenApi;

/// OpenAPI document covering every route and payload.
#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the scoreboard backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::public_stream,
        crate::routes::scoreboard::get_scoreboard,
        crate::routes::scoreboard::add_score,
        crate::routes::scoreboard::undo_score,
        crate::routes::scoreboard::reset_scores,
        crate::routes::scoreboard::toggle_game_clock,
        crate::routes::scoreboard::reset_game_clock,
        crate::routes::scoreboard::set_game_time,
        crate::routes::scoreboard::toggle_shot_clock,
        crate::routes::scoreboard::reset_shot_clock,
        crate::routes::scoreboard::acknowledge_buzzer,
        crate::routes::scoreboard::open_game_time_dialog,
        crate::routes::scoreboard::close_game_time_dialog,
        crate::routes::settings::get_theme,
        crate::routes::settings::put_theme,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::scoreboard::ScoreboardResponse,
            crate::dto::scoreboard::ClockSnapshot,
            crate::dto::scoreboard::AddScoreRequest,
            crate::dto::scoreboard::ShotClockResetRequest,
            crate::dto::scoreboard::GameTimeRequest,
            crate::dto::scoreboard::GameTimeResponse,
            crate::dto::scoreboard::BuzzerAckResponse,
            crate::dto::settings::ThemePreference,
            crate::dto::sse::Handshake,
            crate::dto::sse::ClockEvent,
            crate::dto::sse::BuzzerEvent,
            crate::dto::sse::BuzzerPlayedEvent,
            crate::dto::sse::DialogEvent,
            crate::state::ScoreState,
            crate::state::Team,
            crate::state::ClockKind,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "score", description = "Team scores"),
        (name = "clock", description = "Game and shot clocks, buzzers and the game time dialog"),
        (name = "settings", description = "Display preferences"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthcheck",
            "/scoreboard",
            "/score/{team}/add",
            "/clock/game/time",
            "/buzzer/{clock}/ack",
            "/settings/theme",
            "/sse/public",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
