//! Store settings.

use crate::error::{KanbanError, Result};
use crate::store::toast_store::{DEFAULT_MAX_TOASTS, DEFAULT_TOAST_DURATION_MS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

/// Settings applied when the stores are constructed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Most toasts shown at once; values below one are treated as one
    pub max_toasts: usize,
    /// Auto-dismiss delay for toasts that do not set their own
    pub default_toast_duration_ms: i64,
    /// Skeleton delay before the board renders
    pub board_loading_delay_ms: u64,
    /// Skeleton delay before the board list renders
    pub sidebar_loading_delay_ms: u64,
    /// Preference key under which the theme is stored
    pub theme_storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_toasts: DEFAULT_MAX_TOASTS,
            default_toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            board_loading_delay_ms: 500,
            sidebar_loading_delay_ms: 300,
            theme_storage_key: "theme-storage".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| KanbanError::ConfigError(e.to_string()))
    }

    /// Loads settings from a JSON file. A missing file yields the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await?;
        Self::from_json_str(&contents)
    }

    pub fn board_loading_delay(&self) -> Duration {
        Duration::from_millis(self.board_loading_delay_ms)
    }

    pub fn sidebar_loading_delay(&self) -> Duration {
        Duration::from_millis(self.sidebar_loading_delay_ms)
    }
}
