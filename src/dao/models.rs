use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::warn;

use crate::dao::kv_store::{ScoreboardStore, StoreKey};

/// Game clock duration used when nothing else is configured (10:00).
pub const DEFAULT_GAME_DURATION_MS: u64 = 10 * 60_000;
/// Shot clock duration used when nothing else is configured (24 s).
pub const DEFAULT_SHOT_DURATION_MS: u64 = 24_000;

/// Scoreboard session as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSession {
    /// Points scored by the home team.
    pub home_score: u32,
    /// Points scored by the away team.
    pub away_score: u32,
    /// Remaining game clock time in milliseconds.
    pub game_remaining_ms: u64,
    /// Remaining shot clock time in milliseconds.
    pub shot_remaining_ms: u64,
    /// Whether the game clock was counting down.
    pub game_running: bool,
    /// Whether the shot clock was counting down.
    pub shot_running: bool,
}

impl SavedSession {
    /// A fresh session: 0-0, both clocks stopped at their full durations.
    pub fn fresh(game_duration_ms: u64, shot_duration_ms: u64) -> Self {
        Self {
            home_score: 0,
            away_score: 0,
            game_remaining_ms: game_duration_ms,
            shot_remaining_ms: shot_duration_ms,
            game_running: false,
            shot_running: false,
        }
    }

    /// Read the previous session from `store`, keeping the matching field of
    /// `defaults` for every key that is absent, mistyped or unreadable.
    pub async fn load(store: &dyn ScoreboardStore, defaults: SavedSession) -> Self {
        Self {
            home_score: read_key(store, StoreKey::HomeScore)
                .await
                .unwrap_or(defaults.home_score),
            away_score: read_key(store, StoreKey::AwayScore)
                .await
                .unwrap_or(defaults.away_score),
            game_remaining_ms: read_key(store, StoreKey::GameRemainingMs)
                .await
                .unwrap_or(defaults.game_remaining_ms),
            shot_remaining_ms: read_key(store, StoreKey::ShotRemainingMs)
                .await
                .unwrap_or(defaults.shot_remaining_ms),
            game_running: read_key(store, StoreKey::GameRunning)
                .await
                .unwrap_or(defaults.game_running),
            shot_running: read_key(store, StoreKey::ShotRunning)
                .await
                .unwrap_or(defaults.shot_running),
        }
    }

    /// Every persisted key with its value.
    pub fn entries(&self) -> Vec<(StoreKey, Value)> {
        vec![
            (StoreKey::HomeScore, json!(self.home_score)),
            (StoreKey::AwayScore, json!(self.away_score)),
            (StoreKey::GameRemainingMs, json!(self.game_remaining_ms)),
            (StoreKey::ShotRemainingMs, json!(self.shot_remaining_ms)),
            (StoreKey::GameRunning, json!(self.game_running)),
            (StoreKey::ShotRunning, json!(self.shot_running)),
        ]
    }
}

impl Default for SavedSession {
    fn default() -> Self {
        Self::fresh(DEFAULT_GAME_DURATION_MS, DEFAULT_SHOT_DURATION_MS)
    }
}

/// Read and decode a single key; failures are logged and reported as absent.
pub async fn read_key<T: DeserializeOwned>(store: &dyn ScoreboardStore, key: StoreKey) -> Option<T> {
    let value = match store.get(key).await {
        Ok(value) => value?,
        Err(err) => {
            warn!(key = key.as_str(), error = %err, "failed to read persisted value");
            return None;
        }
    };

    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            warn!(key = key.as_str(), error = %err, "ignoring mistyped persisted value");
            None
        }
    }
}
