use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display theme preference shared by every presentation client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ThemePreference {
    /// `null` lets each client follow its own default.
    pub dark_mode: Option<bool>,
}
