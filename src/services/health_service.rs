use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the session store still accepts writes.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.store().health_check().await {
        Ok(()) => HealthResponse::ok(state.session_id()),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded(state.session_id(), err.to_string())
        }
    }
}
