//! Key/value persistence used to carry a scoreboard session across restarts.

/// Store persisted to a single JSON document.
pub mod json_file;
/// Volatile store for tests and sessions that need not survive restarts.
pub mod memory;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::dao::storage::StorageResult;

pub use self::json_file::JsonFileStore;
pub use self::memory::MemoryStore;

/// Keys written by the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Home team points.
    HomeScore,
    /// Away team points.
    AwayScore,
    /// Game clock remaining time in milliseconds.
    GameRemainingMs,
    /// Shot clock remaining time in milliseconds.
    ShotRemainingMs,
    /// Whether the game clock was counting down.
    GameRunning,
    /// Whether the shot clock was counting down.
    ShotRunning,
    /// Theme preference; `null` follows the system.
    DarkMode,
}

impl StoreKey {
    /// Stable name used on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::HomeScore => "home_score",
            StoreKey::AwayScore => "away_score",
            StoreKey::GameRemainingMs => "game_remaining_ms",
            StoreKey::ShotRemainingMs => "shot_remaining_ms",
            StoreKey::GameRunning => "game_running",
            StoreKey::ShotRunning => "shot_running",
            StoreKey::DarkMode => "dark_mode",
        }
    }
}

/// Abstraction over the key/value backend holding the persisted session.
pub trait ScoreboardStore: Send + Sync {
    /// Read one key; `None` when it was never written.
    fn get(&self, key: StoreKey) -> BoxFuture<'static, StorageResult<Option<Value>>>;
    /// Write several keys in one go; backends persist them together.
    fn put_all(&self, entries: Vec<(StoreKey, Value)>) -> BoxFuture<'static, StorageResult<()>>;
    /// Check that the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;

    /// Write a single key.
    fn put(&self, key: StoreKey, value: Value) -> BoxFuture<'static, StorageResult<()>> {
        self.put_all(vec![(key, value)])
    }
}
