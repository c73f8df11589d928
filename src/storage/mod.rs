use crate::error::Result;
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FilePreferenceStorage;
pub use memory_storage::MemoryPreferenceStorage;

/// Key-value store for the few preferences that outlive the process
#[async_trait]
pub trait PreferenceStorage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Reads a value; `None` if the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
