use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::settings::ThemePreference, error::AppError, services::settings_service,
    state::SharedState,
};

/// Routes exposing display preferences.
pub fn router() -> Router<SharedState> {
    Router::new().route("/settings/theme", get(get_theme).put(put_theme))
}

/// Read the theme preference.
#[utoipa::path(
    get,
    path = "/settings/theme",
    tag = "settings",
    responses((status = 200, description = "Stored preference", body = ThemePreference))
)]
pub async fn get_theme(State(state): State<SharedState>) -> Json<ThemePreference> {
    Json(settings_service::theme(&state).await)
}

/// Replace the theme preference.
#[utoipa::path(
    put,
    path = "/settings/theme",
    tag = "settings",
    request_body = ThemePreference,
    responses(
        (status = 200, description = "Preference saved", body = ThemePreference),
        (status = 503, description = "Preference could not be saved")
    )
)]
pub async fn put_theme(
    State(state): State<SharedState>,
    Json(payload): Json<ThemePreference>,
) -> Result<Json<ThemePreference>, AppError> {
    Ok(Json(settings_service::set_theme(&state, payload).await?))
}
