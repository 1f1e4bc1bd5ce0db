/// Clock identifiers and buzzer flags.
pub mod buzzer;
/// The scoreboard controller.
pub mod controller;
/// Teams and scores.
pub mod score;
mod sse;

use std::sync::Arc;

use uuid::Uuid;

use crate::{config::AppConfig, dao::kv_store::ScoreboardStore};

pub use self::buzzer::ClockKind;
pub use self::controller::{ClockStatus, ScoreboardController, ScoreboardSnapshot};
pub use self::score::{ScoreState, Team};
pub use self::sse::SseHub;

/// Shared handle to [`AppState`] used as the axum router state.
pub type SharedState = Arc<AppState>;

/// Capacity of the public SSE channel; clock ticks make it the busiest stream.
const PUBLIC_SSE_CAPACITY: usize = 64;

/// Central application state handed to every route and background task.
pub struct AppState {
    session_id: Uuid,
    config: AppConfig,
    controller: ScoreboardController,
    store: Arc<dyn ScoreboardStore>,
    public_sse: SseHub,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(
        config: AppConfig,
        controller: ScoreboardController,
        store: Arc<dyn ScoreboardStore>,
    ) -> SharedState {
        Arc::new(Self {
            session_id: Uuid::new_v4(),
            config,
            controller,
            store,
            public_sse: SseHub::new(PUBLIC_SSE_CAPACITY),
        })
    }

    /// Identifier of this process's scoreboard session, so clients can spot restarts.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The scoreboard controller, sole mutator of scores and clocks.
    pub fn controller(&self) -> &ScoreboardController {
        &self.controller
    }

    /// Key/value store backing the session and settings.
    pub fn store(&self) -> &Arc<dyn ScoreboardStore> {
        &self.store
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn public_sse(&self) -> &SseHub {
        &self.public_sse
    }
}

/// Fresh in-memory application state for service and route tests.
#[cfg(test)]
pub(crate) async fn test_state() -> SharedState {
    use crate::{
        dao::{kv_store::MemoryStore, models::SavedSession},
        timer::{DEFAULT_TICK_INTERVAL, TokioClock},
    };

    let store: Arc<dyn ScoreboardStore> = Arc::new(MemoryStore::new());
    let controller = ScoreboardController::init(
        SavedSession::default(),
        Arc::clone(&store),
        Arc::new(TokioClock::new()),
        DEFAULT_TICK_INTERVAL,
    )
    .await;
    AppState::new(AppConfig::default(), controller, store)
}
