//! User preferences persisted under the settings key.

use serde::{Deserialize, Serialize};

/// Display preferences. Unknown or missing fields fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The app starts in dark mode.
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}
