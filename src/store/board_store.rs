use crate::domain::board::{board_route, Board};
use crate::store::notify::Notifier;
use std::collections::HashSet;
use tokio::sync::watch;
use tracing::{debug, info};

/// Board collection with single-active selection
#[derive(Debug, Default)]
pub struct BoardStore {
    boards: Vec<Board>,
    is_loading: bool,
    notifier: Notifier,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All boards in insertion order
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Merges boards into the collection.
    ///
    /// The existing boards followed by `boards` are de-duplicated by id;
    /// the earliest occurrence wins. This also drops repeats that
    /// [`BoardStore::add_board`] let in.
    pub fn set_boards(&mut self, boards: impl IntoIterator<Item = Board>) {
        let before = self.boards.len();
        let mut seen = HashSet::new();

        let existing = std::mem::take(&mut self.boards);
        self.boards = existing
            .into_iter()
            .filter(|b| seen.insert(b.id.clone()))
            .collect();
        let dropped = before - self.boards.len();

        let kept = self.boards.len();
        self.boards.extend(boards.into_iter().filter(|b| seen.insert(b.id.clone())));
        let added = self.boards.len() - kept;

        debug!(added, dropped, total = self.boards.len(), "merged boards");
        if added + dropped > 0 {
            self.notifier.notify();
        }
    }

    /// Marks the matching board active and every other board inactive.
    /// Unknown ids leave the collection untouched.
    pub fn set_active_board(&mut self, board_id: &str) {
        if !self.boards.iter().any(|b| b.id == board_id) {
            debug!(%board_id, "set_active_board: unknown board ignored");
            return;
        }

        for board in &mut self.boards {
            board.is_active = board.id == board_id;
        }

        info!(%board_id, "board activated");
        self.notifier.notify();
    }

    pub fn add_board(&mut self, board: Board) {
        debug!(board_id = %board.id, name = %board.name, "adding board");
        self.boards.push(board);
        self.notifier.notify();
    }

    pub fn remove_board(&mut self, board: &Board) {
        let before = self.boards.len();
        self.boards.retain(|b| b.id != board.id);

        if self.boards.len() != before {
            debug!(board_id = %board.id, "removed board");
            self.notifier.notify();
        }
    }

    pub fn active_board(&self) -> Option<&Board> {
        self.boards.iter().find(|b| b.is_active)
    }

    pub fn active_board_id(&self) -> Option<&str> {
        self.active_board().map(|b| b.id.as_str())
    }

    /// URL-friendly name of the active board
    pub fn active_board_slug(&self) -> Option<String> {
        self.active_board().map(Board::slug)
    }

    pub fn board_by_id(&self, board_id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    /// Route for navigating to a board; the board need not exist yet
    pub fn board_route(&self, board_id: &str) -> String {
        board_route(board_id)
    }

    /// Marks a board load in progress. Navigation is suppressed meanwhile.
    pub fn set_loading(&mut self, is_loading: bool) {
        if self.is_loading != is_loading {
            self.is_loading = is_loading;
            self.notifier.notify();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether selecting `board_id` should navigate: not while a board is
    /// loading, and not to the board already shown
    pub fn can_navigate_to(&self, board_id: &str) -> bool {
        !self.is_loading && self.active_board_id() != Some(board_id)
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(ids: &[&str]) -> BoardStore {
        let mut store = BoardStore::new();
        store.set_boards(ids.iter().map(|id| Board::new(*id, format!("Board {id}"))));
        store
    }

    #[test]
    fn test_set_boards_deduplicates_by_id() {
        let mut store = store_with(&["b1", "b2"]);

        store.set_boards(vec![
            Board::new("b2", "Replacement"),
            Board::new("b3", "Third"),
            Board::new("b3", "Third again"),
        ]);

        let ids: Vec<_> = store.boards().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2", "b3"]);
        assert_eq!(store.boards()[1].name, "Board b2");
        assert_eq!(store.boards()[2].name, "Third");
    }

    #[test]
    fn test_set_boards_drops_repeats_from_add_board() {
        let mut store = BoardStore::new();
        store.add_board(Board::new("b1", "Launch"));
        store.add_board(Board::new("b1", "Again"));

        store.set_boards(vec![]);
        assert_eq!(store.boards().len(), 1);
        assert_eq!(store.boards()[0].name, "Launch");

        store.add_board(Board::new("b1", "Third"));
        store.set_boards(vec![Board::new("b2", "Two")]);
        let ids: Vec<_> = store.boards().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
    }

    #[test]
    fn test_set_boards_without_changes_does_not_notify() {
        let mut store = store_with(&["b1", "b2"]);
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.set_boards(vec![]);
        store.set_boards(vec![Board::new("b2", "Known")]);
        assert!(!rx.has_changed().unwrap());

        store.set_boards(vec![Board::new("b3", "New")]);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_set_active_board_is_exclusive() {
        let mut store = store_with(&["b1", "b2", "b3"]);

        store.set_active_board("b1");
        store.set_active_board("b3");

        let active: Vec<_> = store.boards().iter().filter(|b| b.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(store.active_board_id(), Some("b3"));
    }

    #[test]
    fn test_set_active_board_unknown_is_noop() {
        let mut store = store_with(&["b1"]);
        store.set_active_board("b1");
        let revision = store.notifier.revision();

        store.set_active_board("missing");
        assert_eq!(store.active_board_id(), Some("b1"));
        assert_eq!(store.notifier.revision(), revision);
    }

    #[test]
    fn test_add_and_remove_board() {
        let mut store = BoardStore::new();
        let board = Board::new("b1", "Launch");

        store.add_board(board.clone());
        assert_eq!(store.boards().len(), 1);

        store.remove_board(&board);
        assert!(store.boards().is_empty());
        assert_eq!(store.active_board_id(), None);
    }

    #[test]
    fn test_active_board_slug() {
        let mut store = BoardStore::new();
        store.add_board(Board::new("b1", "Platform Launch"));
        assert_eq!(store.active_board_slug(), None);

        store.set_active_board("b1");
        assert_eq!(store.active_board_slug().as_deref(), Some("platform-launch"));
    }

    #[test]
    fn test_navigation_guard() {
        let mut store = store_with(&["b1", "b2"]);
        store.set_active_board("b1");

        assert!(!store.can_navigate_to("b1"));
        assert!(store.can_navigate_to("b2"));

        store.set_loading(true);
        assert!(store.is_loading());
        assert!(!store.can_navigate_to("b2"));
        assert_eq!(store.board_route("b2"), "/board/b2");
    }
}
