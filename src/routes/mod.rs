use axum::Router;

use crate::state::SharedState;

/// Swagger UI and the OpenAPI document.
pub mod docs;
/// Health check routes.
pub mod health;
/// Score, clock, buzzer and dialog routes.
pub mod scoreboard;
/// Theme preference routes.
pub mod settings;
/// Server-Sent Events routes.
pub mod sse;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(scoreboard::router())
        .merge(settings::router());

    api_router.merge(docs::router()).with_state(state)
}
