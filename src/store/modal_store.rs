use crate::store::notify::Notifier;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::watch;
use tracing::debug;

/// Kind of modal, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModalType {
    AddBoard,
    EditBoard,
    AddColumn,
    EditColumn,
    AddTask,
    EditTask,
}

impl ModalType {
    /// Whether this modal has a form; the others show a placeholder
    pub fn has_form(self) -> bool {
        matches!(self, Self::AddTask | Self::EditTask)
    }
}

impl fmt::Display for ModalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddBoard => write!(f, "Add New Board"),
            Self::EditBoard => write!(f, "Edit Board"),
            Self::AddColumn => write!(f, "Add New Column"),
            Self::EditColumn => write!(f, "Edit Column"),
            Self::AddTask => write!(f, "Add New Task"),
            Self::EditTask => write!(f, "Edit Task"),
        }
    }
}

/// An open modal and the data it was opened with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "modalType", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Modal {
    AddBoard,
    EditBoard { board_id: String },
    AddColumn { board_id: String },
    EditColumn { column_id: String },
    AddTask { board_id: String },
    EditTask { task_id: String, board_id: String },
}

impl Modal {
    pub fn modal_type(&self) -> ModalType {
        match self {
            Self::AddBoard => ModalType::AddBoard,
            Self::EditBoard { .. } => ModalType::EditBoard,
            Self::AddColumn { .. } => ModalType::AddColumn,
            Self::EditColumn { .. } => ModalType::EditColumn,
            Self::AddTask { .. } => ModalType::AddTask,
            Self::EditTask { .. } => ModalType::EditTask,
        }
    }
}

/// What the modal renderer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalContent<'a> {
    None,
    Form(&'a Modal),
    Placeholder(ModalType),
}

/// The single modal slot. Opening replaces whatever is open.
#[derive(Debug, Default)]
pub struct ModalStore {
    current: Option<Modal>,
    notifier: Notifier,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_modal(&mut self, modal: Modal) {
        if let Some(previous) = &self.current {
            debug!(replaced = %previous.modal_type(), "replacing open modal");
        }
        debug!(modal_type = %modal.modal_type(), "opening modal");
        self.current = Some(modal);
        self.notifier.notify();
    }

    pub fn close_modal(&mut self) {
        if self.current.take().is_some() {
            debug!("modal closed");
            self.notifier.notify();
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Modal> {
        self.current.as_ref()
    }

    pub fn modal_type(&self) -> Option<ModalType> {
        self.current.as_ref().map(Modal::modal_type)
    }

    pub fn content(&self) -> ModalContent<'_> {
        match &self.current {
            None => ModalContent::None,
            Some(modal) if modal.modal_type().has_form() => ModalContent::Form(modal),
            Some(modal) => ModalContent::Placeholder(modal.modal_type()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }
}
