use crate::error::{KanbanError, Result};
use crate::storage::PreferenceStorage;
use crate::store::notify::Notifier;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Whether the board sidebar is collapsed
#[derive(Debug, Default)]
pub struct SidebarStore {
    is_sidebar_hidden: bool,
    notifier: Notifier,
}

impl SidebarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sidebar_hidden(&self) -> bool {
        self.is_sidebar_hidden
    }

    pub fn toggle_sidebar(&mut self) {
        self.is_sidebar_hidden = !self.is_sidebar_hidden;
        debug!(hidden = self.is_sidebar_hidden, "sidebar toggled");
        self.notifier.notify();
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }
}

/// Colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Theme to use when nothing has been stored
    pub fn from_system_preference(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = KanbanError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(KanbanError::InvalidTheme(s.to_string())),
        }
    }
}

/// Current theme; the only state persisted across restarts
#[derive(Debug)]
pub struct ThemeStore {
    theme: Theme,
    storage_key: String,
    notifier: Notifier,
}

impl ThemeStore {
    pub fn new(theme: Theme, storage_key: impl Into<String>) -> Self {
        Self {
            theme,
            storage_key: storage_key.into(),
            notifier: Notifier::new(),
        }
    }

    /// Reads the stored theme once at startup.
    ///
    /// Falls back to the system preference when nothing is stored or the
    /// stored value cannot be read.
    pub async fn load(
        storage: &dyn PreferenceStorage,
        storage_key: impl Into<String>,
        system_prefers_dark: bool,
    ) -> Self {
        let storage_key = storage_key.into();
        let fallback = Theme::from_system_preference(system_prefers_dark);

        let theme = match storage.get(&storage_key).await {
            Ok(Some(value)) => value.parse::<Theme>().unwrap_or_else(|e| {
                warn!(error = %e, key = %storage_key, "ignoring stored theme");
                fallback
            }),
            Ok(None) => fallback,
            Err(e) => {
                warn!(error = %e, key = %storage_key, "could not read stored theme");
                fallback
            }
        };

        debug!(%theme, "theme loaded");
        Self::new(theme, storage_key)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Changes the theme in memory only; see [`ThemeStore::set_and_persist`]
    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.notifier.notify();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    /// Changes the theme and writes it to storage
    pub async fn set_and_persist(
        &mut self,
        theme: Theme,
        storage: &dyn PreferenceStorage,
    ) -> Result<()> {
        self.set_theme(theme);
        self.persist(storage).await
    }

    pub async fn toggle_and_persist(&mut self, storage: &dyn PreferenceStorage) -> Result<()> {
        self.set_and_persist(self.theme.toggled(), storage).await
    }

    /// Writes the current theme to storage
    pub async fn persist(&self, storage: &dyn PreferenceStorage) -> Result<()> {
        storage.set(&self.storage_key, self.theme.as_str()).await?;
        info!(theme = %self.theme, key = %self.storage_key, "theme persisted");
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPreferenceStorage;

    const KEY: &str = "theme-storage";

    #[test]
    fn test_toggle_sidebar() {
        let mut store = SidebarStore::new();
        assert!(!store.is_sidebar_hidden());

        store.toggle_sidebar();
        assert!(store.is_sidebar_hidden());

        store.toggle_sidebar();
        assert!(!store.is_sidebar_hidden());
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" Light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!(matches!("blue".parse::<Theme>(), Err(KanbanError::InvalidTheme(_))));
    }

    #[test]
    fn test_toggle_theme() {
        let mut store = ThemeStore::new(Theme::Light, KEY);
        store.toggle_theme();
        assert_eq!(store.theme(), Theme::Dark);
        store.toggle_theme();
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_set_same_theme_does_not_notify() {
        let mut store = ThemeStore::new(Theme::Dark, KEY);
        let rx = store.subscribe();

        store.set_theme(Theme::Dark);
        assert!(!rx.has_changed().unwrap());

        store.set_theme(Theme::Light);
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_load_falls_back_to_system_preference() {
        let storage = MemoryPreferenceStorage::new();

        let store = ThemeStore::load(&storage, KEY, true).await;
        assert_eq!(store.theme(), Theme::Dark);

        let store = ThemeStore::load(&storage, KEY, false).await;
        assert_eq!(store.theme(), Theme::Light);
    }

    #[tokio::test]
    async fn test_stored_theme_wins_over_system() {
        let storage = MemoryPreferenceStorage::new();
        storage.set(KEY, "light").await.unwrap();

        let store = ThemeStore::load(&storage, KEY, true).await;
        assert_eq!(store.theme(), Theme::Light);
    }

    #[tokio::test]
    async fn test_invalid_stored_theme_is_ignored() {
        let storage = MemoryPreferenceStorage::new();
        storage.set(KEY, "purple").await.unwrap();

        let store = ThemeStore::load(&storage, KEY, true).await;
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_persist_round_trip() {
        let storage = MemoryPreferenceStorage::new();

        let mut store = ThemeStore::load(&storage, KEY, false).await;
        store.toggle_theme();
        store.persist(&storage).await.unwrap();
        assert_eq!(storage.get(KEY).await.unwrap().as_deref(), Some("dark"));

        let restarted = ThemeStore::load(&storage, KEY, false).await;
        assert_eq!(restarted.theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_theme_changes_saved_on_each_mutation() {
        let storage = MemoryPreferenceStorage::new();
        let mut store = ThemeStore::load(&storage, KEY, false).await;

        store.toggle_and_persist(&storage).await.unwrap();
        assert_eq!(storage.get(KEY).await.unwrap().as_deref(), Some("dark"));

        store.set_and_persist(Theme::Light, &storage).await.unwrap();
        assert_eq!(storage.get(KEY).await.unwrap().as_deref(), Some("light"));

        let restarted = ThemeStore::load(&storage, KEY, true).await;
        assert_eq!(restarted.theme(), Theme::Light);
    }
}
