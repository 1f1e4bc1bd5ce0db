use serde_json::json;
use tracing::debug;

use crate::{
    dao::{kv_store::StoreKey, models::read_key},
    dto::settings::ThemePreference,
    error::ServiceError,
    state::SharedState,
};

/// Read the stored theme preference; unreadable values count as unset.
pub async fn theme(state: &SharedState) -> ThemePreference {
    ThemePreference {
        dark_mode: read_key::<Option<bool>>(state.store().as_ref(), StoreKey::DarkMode)
            .await
            .flatten(),
    }
}

/// Persist a new theme preference. `None` clears it.
pub async fn set_theme(
    state: &SharedState,
    preference: ThemePreference,
) -> Result<ThemePreference, ServiceError> {
    state
        .store()
        .put(StoreKey::DarkMode, json!(preference.dark_mode))
        .await?;
    debug!(dark_mode = ?preference.dark_mode, "theme preference saved");
    Ok(preference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    #[tokio::test(start_paused = true)]
    async fn theme_defaults_to_unset_and_round_trips() {
        let state = test_state().await;
        assert_eq!(theme(&state).await, ThemePreference { dark_mode: None });

        set_theme(&state, ThemePreference { dark_mode: Some(true) })
            .await
            .unwrap();
        assert_eq!(theme(&state).await.dark_mode, Some(true));

        set_theme(&state, ThemePreference { dark_mode: None })
            .await
            .unwrap();
        assert_eq!(theme(&state).await.dark_mode, None);
    }
}
