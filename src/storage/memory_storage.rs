use crate::{error::Result, storage::PreferenceStorage};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Preferences kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryPreferenceStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStorage for MemoryPreferenceStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryPreferenceStorage::new();
        assert_eq!(storage.get("theme-storage").await.unwrap(), None);

        storage.set("theme-storage", "dark").await.unwrap();
        assert_eq!(storage.get("theme-storage").await.unwrap().as_deref(), Some("dark"));

        storage.remove("theme-storage").await.unwrap();
        storage.remove("theme-storage").await.unwrap();
        assert_eq!(storage.get("theme-storage").await.unwrap(), None);
    }
}
