use crate::domain::column::{default_columns, Column, ColumnPatch};
use crate::store::notify::Notifier;
use std::collections::HashSet;
use tokio::sync::watch;
use tracing::debug;

/// Column collection, scoped by board on lookup
#[derive(Debug, Default)]
pub struct ColumnStore {
    columns: Vec<Column>,
    notifier: Notifier,
}

impl ColumnStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Merges columns into the collection. Existing and incoming columns
    /// are de-duplicated together by id, keeping the first occurrence.
    pub fn set_columns(&mut self, columns: impl IntoIterator<Item = Column>) {
        let before = self.columns.len();
        let mut seen = HashSet::new();

        let existing = std::mem::take(&mut self.columns);
        self.columns = existing
            .into_iter()
            .filter(|c| seen.insert(c.id.clone()))
            .collect();
        let dropped = before - self.columns.len();

        let kept = self.columns.len();
        self.columns.extend(columns.into_iter().filter(|c| seen.insert(c.id.clone())));
        let added = self.columns.len() - kept;

        debug!(added, dropped, total = self.columns.len(), "merged columns");
        if added + dropped > 0 {
            self.notifier.notify();
        }
    }

    /// Seeds the default TODO / IN_PROGRESS / DONE lanes for a board
    pub fn seed_defaults(&mut self, board_id: &str) {
        self.set_columns(default_columns(board_id));
    }

    pub fn add_column(&mut self, column: Column) {
        debug!(column_id = %column.id, board_id = %column.board_id, "adding column");
        self.columns.push(column);
        self.notifier.notify();
    }

    pub fn remove_column(&mut self, column_id: &str) {
        let before = self.columns.len();
        self.columns.retain(|c| c.id != column_id);

        if self.columns.len() != before {
            debug!(%column_id, "removed column");
            self.notifier.notify();
        }
    }

    pub fn update_column(&mut self, column_id: &str, patch: ColumnPatch) {
        match self.columns.iter_mut().find(|c| c.id == column_id) {
            Some(column) => {
                column.apply(patch);
                self.notifier.notify();
            }
            None => debug!(%column_id, "update_column: unknown column ignored"),
        }
    }

    pub fn column_by_id(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Columns of one board; empty when the board has none
    pub fn columns_by_board_id(&self, board_id: &str) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.board_id == board_id).collect()
    }

    /// Status names of a board's columns, for status pickers
    pub fn column_statuses_by_board_id(&self, board_id: &str) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.board_id == board_id)
            .map(|c| c.status.clone())
            .collect()
    }

    /// Resolves a status picked in a form to the board's column
    pub fn column_by_status(&self, board_id: &str, status: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.board_id == board_id && c.status == status)
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ColumnStore {
        let mut store = ColumnStore::new();
        store.set_columns(vec![
            Column::new("todo", "b1", "TODO", "#49C4E5"),
            Column::new("doing", "b1", "IN_PROGRESS", "#635fc7"),
            Column::new("other", "b2", "TODO", "#67E2AE"),
        ]);
        store
    }

    #[test]
    fn test_set_columns_deduplicates_by_id() {
        let mut store = sample();
        store.set_columns(vec![
            Column::new("todo", "b9", "Dup", "#000"),
            Column::new("done", "b1", "DONE", "#67E2AE"),
        ]);

        assert_eq!(store.columns().len(), 4);
        assert_eq!(store.column_by_id("todo").unwrap().board_id, "b1");
    }

    #[test]
    fn test_set_columns_drops_repeats_from_add_column() {
        let mut store = ColumnStore::new();
        store.add_column(Column::new("c1", "b1", "TODO", "#49C4E5"));
        store.add_column(Column::new("c1", "b1", "DONE", "#67E2AE"));

        store.set_columns(vec![]);
        assert_eq!(store.columns().len(), 1);
        assert_eq!(store.column_by_id("c1").unwrap().status, "TODO");
    }

    #[test]
    fn test_set_columns_without_changes_does_not_notify() {
        let mut store = sample();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.set_columns(vec![]);
        store.set_columns(vec![Column::new("todo", "b9", "Dup", "#000")]);
        assert!(!rx.has_changed().unwrap());

        store.set_columns(vec![Column::new("done", "b1", "DONE", "#67E2AE")]);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_columns_by_board_id() {
        let store = sample();

        let ids: Vec<_> = store.columns_by_board_id("b1").iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["todo", "doing"]);
        assert!(store.columns_by_board_id("unknown-board").is_empty());
    }

    #[test]
    fn test_column_statuses_by_board_id() {
        let store = sample();
        assert_eq!(store.column_statuses_by_board_id("b1"), vec!["TODO", "IN_PROGRESS"]);
        assert!(store.column_statuses_by_board_id("nope").is_empty());
    }

    #[test]
    fn test_update_and_remove_column() {
        let mut store = sample();

        store.update_column("doing", ColumnPatch::status("Doing"));
        assert_eq!(store.column_by_id("doing").unwrap().status, "Doing");

        store.update_column("missing", ColumnPatch::status("x"));
        assert_eq!(store.columns().len(), 3);

        store.remove_column("doing");
        assert!(store.column_by_id("doing").is_none());
        assert_eq!(store.columns().len(), 2);
    }

    #[test]
    fn test_column_by_status_is_board_scoped() {
        let store = sample();
        assert_eq!(store.column_by_status("b2", "TODO").unwrap().id, "other");
        assert!(store.column_by_status("b2", "IN_PROGRESS").is_none());
    }

    #[test]
    fn test_seed_defaults() {
        let mut store = ColumnStore::new();
        store.seed_defaults("b1");
        assert_eq!(store.columns_by_board_id("b1").len(), 3);
    }
}
