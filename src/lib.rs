//! # Kanban Core
//!
//! State layer for a kanban board client.
//!
//! This crate holds boards, columns, tasks and subtasks in memory, along
//! with the transient UI state around them (modal, toasts, sidebar, theme).
//! Views read derived state from the stores and subscribe to their change
//! notifications; nothing here renders or talks to a network.

pub mod config;
pub mod domain;
pub mod error;
pub mod queue;
pub mod scheduler;
pub mod storage;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use config::StoreConfig;
pub use domain::{
    board::Board,
    column::{Column, ColumnPatch},
    task::{NewTask, Subtask, Task, TaskPatch},
};
pub use error::{KanbanError, Result};
pub use queue::BoundedQueue;
pub use storage::PreferenceStorage;
pub use store::{
    modal_store::{Modal, ModalStore, ModalType},
    toast_store::{NewToast, Toast, ToastKind, ToastStore},
    ui_store::{SidebarStore, Theme, ThemeStore},
    AppStores, BoardStore, ColumnStore, TaskStore,
};
pub use view::BoardView;
