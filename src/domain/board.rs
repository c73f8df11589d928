use crate::domain::id::{generate_id, slugify};
use serde::{Deserialize, Serialize};

/// A kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Board {
    /// Creates an inactive board with the given id and name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: false,
        }
    }

    /// Creates an inactive board with a freshly generated id
    pub fn with_generated_id(name: impl Into<String>) -> Self {
        Self::new(generate_id(), name)
    }

    /// URL-friendly form of the board name
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Route under which this board is displayed
    pub fn route(&self) -> String {
        board_route(&self.id)
    }
}

/// Route for a board id, e.g. `/board/3f2a...`
pub fn board_route(board_id: &str) -> String {
    format!("/board/{board_id}")
}
