use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Overall service condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Everything is operational.
    Ok,
    /// Scoreboard keeps running but changes are not being saved.
    Degraded,
}

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall condition.
    pub status: HealthStatus,
    /// Scoreboard session served by this process.
    pub session_id: Uuid,
    /// Why the session store is failing, when it is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_error: Option<String>,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(session_id: Uuid) -> Self {
        Self {
            status: HealthStatus::Ok,
            session_id,
            storage_error: None,
        }
    }

    /// Create a health response indicating the session store is failing.
    pub fn degraded(session_id: Uuid, reason: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            session_id,
            storage_error: Some(reason.into()),
        }
    }
}
