use crate::domain::id::generate_id;
use serde::{Deserialize, Serialize};

/// Status names used by the default lanes
pub const STATUS_TODO: &str = "TODO";
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const STATUS_DONE: &str = "DONE";

/// Colours offered for new columns
pub const COLUMN_PALETTE: [&str; 7] = [
    "#49C4E5", "#635fc7", "#67E2AE", "#F39C12", "#E74C3C", "#9B59B6", "#1ABC9C",
];

/// A lane within one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub board_id: String,
    pub status: String,
    pub color: String,
}

impl Column {
    pub fn new(
        id: impl Into<String>,
        board_id: impl Into<String>,
        status: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            board_id: board_id.into(),
            status: status.into(),
            color: color.into(),
        }
    }

    /// Applies every field present in the patch
    pub fn apply(&mut self, patch: ColumnPatch) {
        if let Some(board_id) = patch.board_id {
            self.board_id = board_id;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Partial update for a column. The id is never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPatch {
    pub board_id: Option<String>,
    pub status: Option<String>,
    pub color: Option<String>,
}

impl ColumnPatch {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }
}

/// The three lanes a fresh board starts with
pub fn default_columns(board_id: &str) -> Vec<Column> {
    [
        (STATUS_TODO, COLUMN_PALETTE[0]),
        (STATUS_IN_PROGRESS, COLUMN_PALETTE[1]),
        (STATUS_DONE, COLUMN_PALETTE[2]),
    ]
    .into_iter()
    .map(|(status, color)| Column::new(generate_id(), board_id, status, color))
    .collect()
}
