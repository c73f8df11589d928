//! Application stores.
//!
//! Each store owns one slice of state and exposes it only through its own
//! methods. [`AppStores`] is built once at startup and handed to views by
//! reference.

use crate::config::StoreConfig;
use crate::storage::PreferenceStorage;

pub mod board_store;
pub mod column_store;
pub mod modal_store;
pub mod notify;
pub mod task_store;
pub mod toast_store;
pub mod ui_store;

pub use board_store::BoardStore;
pub use column_store::ColumnStore;
pub use modal_store::{Modal, ModalContent, ModalStore, ModalType};
pub use notify::Notifier;
pub use task_store::TaskStore;
pub use toast_store::{NewToast, Toast, ToastKind, ToastStore};
pub use ui_store::{SidebarStore, Theme, ThemeStore};

/// Every store the application uses
#[derive(Debug)]
pub struct AppStores {
    pub boards: BoardStore,
    pub columns: ColumnStore,
    pub tasks: TaskStore,
    pub modal: ModalStore,
    pub toasts: ToastStore,
    pub sidebar: SidebarStore,
    pub theme: ThemeStore,
}

impl AppStores {
    /// Builds empty stores with the given settings and a default theme
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            boards: BoardStore::new(),
            columns: ColumnStore::new(),
            tasks: TaskStore::new(),
            modal: ModalStore::new(),
            toasts: ToastStore::new(config.max_toasts, config.default_toast_duration_ms),
            sidebar: SidebarStore::new(),
            theme: ThemeStore::new(Theme::default(), config.theme_storage_key.clone()),
        }
    }

    /// Builds the stores and restores the persisted theme
    pub async fn bootstrap(
        config: &StoreConfig,
        storage: &dyn PreferenceStorage,
        system_prefers_dark: bool,
    ) -> Self {
        let mut stores = Self::new(config);
        stores.theme =
            ThemeStore::load(storage, config.theme_storage_key.clone(), system_prefers_dark).await;
        stores
    }
}
