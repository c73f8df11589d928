use crate::{
    error::{KanbanError, Result},
    storage::PreferenceStorage,
};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::{fs, sync::Mutex};
use tracing::debug;

/// File-based preference storage: one JSON object under `.kanban/`
pub struct FilePreferenceStorage {
    root_path: PathBuf,
    // Serializes read-modify-write cycles on the preferences file
    write_lock: Mutex<()>,
}

impl FilePreferenceStorage {
    const KANBAN_DIR: &'static str = ".kanban";
    const PREFERENCES_FILE: &'static str = "preferences.json";

    /// Creates a new FilePreferenceStorage under the given root
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().join(Self::KANBAN_DIR),
            write_lock: Mutex::new(()),
        }
    }

    fn preferences_file(&self) -> PathBuf {
        self.root_path.join(Self::PREFERENCES_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let file_path = self.preferences_file();

        if !file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&file_path).await?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            KanbanError::StorageError(format!("{} is corrupt: {e}", file_path.display()))
        })
    }

    async fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(values)?;
        fs::write(self.preferences_file(), json).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStorage for FilePreferenceStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        if !self.preferences_file().exists() {
            self.write_all(&BTreeMap::new()).await?;
        }

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values).await?;

        debug!(%key, "preference written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut values = self.read_all().await?;
        if values.remove(key).is_some() {
            self.write_all(&values).await?;
        }
        Ok(())
    }
}
