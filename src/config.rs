//! Application-level configuration loading, including clock defaults and the session file.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    dao::models::{DEFAULT_GAME_DURATION_MS, DEFAULT_SHOT_DURATION_MS, SavedSession},
    domain::game_time,
    timer::DEFAULT_TICK_INTERVAL,
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SCOREBOARD_BACK_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Refresh period of running clocks.
    pub tick_interval: Duration,
    /// Game clock duration for a fresh session.
    pub game_duration_ms: u64,
    /// Shot clock duration for a fresh session.
    pub shot_duration_ms: u64,
    /// Session file; `None` keeps the session in memory only.
    pub store_path: Option<PathBuf>,
    /// Play and acknowledge buzzers server-side as soon as they are raised.
    pub auto_dispatch_buzzer: bool,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to baked-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        tick_interval_ms = app_config.tick_interval.as_millis() as u64,
                        game_duration_ms = app_config.game_duration_ms,
                        shot_duration_ms = app_config.shot_duration_ms,
                        "loaded scoreboard config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Session used when nothing has been persisted yet.
    pub fn fresh_session(&self) -> SavedSession {
        SavedSession::fresh(self.game_duration_ms, self.shot_duration_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            game_duration_ms: DEFAULT_GAME_DURATION_MS,
            shot_duration_ms: DEFAULT_SHOT_DURATION_MS,
            store_path: None,
            auto_dispatch_buzzer: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    tick_interval_ms: Option<u64>,
    game_minutes: Option<i32>,
    shot_seconds: Option<u32>,
    /// Absent or `null` selects the in-memory store.
    store_path: Option<PathBuf>,
    auto_dispatch_buzzer: Option<bool>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();

        let tick_interval = match value.tick_interval_ms {
            Some(0) => {
                warn!("tick_interval_ms must be positive; using default");
                defaults.tick_interval
            }
            Some(ms) => Duration::from_millis(ms),
            None => defaults.tick_interval,
        };

        let game_duration_ms = match value.game_minutes {
            Some(minutes) => game_time::to_millis(minutes, 0).unwrap_or_else(|| {
                warn!(minutes, "game_minutes out of range; using default");
                defaults.game_duration_ms
            }),
            None => defaults.game_duration_ms,
        };

        let shot_duration_ms = match value.shot_seconds {
            Some(0) => {
                warn!("shot_seconds must be positive; using default");
                defaults.shot_duration_ms
            }
            Some(seconds) => u64::from(seconds) * 1_000,
            None => defaults.shot_duration_ms,
        };

        Self {
            tick_interval,
            game_duration_ms,
            shot_duration_ms,
            store_path: value.store_path,
            auto_dispatch_buzzer: value
                .auto_dispatch_buzzer
                .unwrap_or(defaults.auto_dispatch_buzzer),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AppConfig {
        serde_json::from_str::<RawConfig>(json).unwrap().into()
    }

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(parse("{}"), AppConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = parse(
            r#"{
                "tick_interval_ms": 100,
                "game_minutes": 12,
                "shot_seconds": 30,
                "store_path": "/var/lib/scoreboard/session.json",
                "auto_dispatch_buzzer": false
            }"#,
        );

        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.game_duration_ms, 720_000);
        assert_eq!(config.shot_duration_ms, 30_000);
        assert_eq!(
            config.store_path,
            Some(PathBuf::from("/var/lib/scoreboard/session.json"))
        );
        assert!(!config.auto_dispatch_buzzer);
    }

    #[test]
    fn null_store_path_selects_memory() {
        assert_eq!(parse(r#"{ "store_path": null }"#).store_path, None);
        assert_eq!(parse("{}").store_path, None);
    }

    #[test]
    fn out_of_range_values_fall_back() {
        let config = parse(r#"{ "tick_interval_ms": 0, "game_minutes": 75, "shot_seconds": 0 }"#);
        assert_eq!(config.tick_interval, DEFAULT_TICK_INTERVAL);
        assert_eq!(config.game_duration_ms, DEFAULT_GAME_DURATION_MS);
        assert_eq!(config.shot_duration_ms, DEFAULT_SHOT_DURATION_MS);
    }

    #[test]
    fn fresh_session_reflects_configured_durations() {
        let config = parse(r#"{ "game_minutes": 8, "shot_seconds": 14 }"#);
        let session = config.fresh_session();
        assert_eq!(session.game_remaining_ms, 480_000);
        assert_eq!(session.shot_remaining_ms, 14_000);
        assert_eq!((session.home_score, session.away_score), (0, 0));
    }
}
