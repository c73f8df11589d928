//! Derived board layout: a board's columns with their tasks joined in.

use crate::domain::column::Column;
use crate::domain::id::slugify;
use crate::domain::task::Task;
use crate::store::{ColumnStore, TaskStore};

/// One column and the tasks currently in it
#[derive(Debug, Clone, PartialEq)]
pub struct Lane<'a> {
    pub column: &'a Column,
    pub tasks: Vec<&'a Task>,
}

impl Lane<'_> {
    /// Header text, e.g. `TODO (3)`
    pub fn heading(&self) -> String {
        format!("{} ({})", self.column.status, self.tasks.len())
    }
}

/// Snapshot of one board, read from the stores
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView<'a> {
    pub board_id: &'a str,
    pub lanes: Vec<Lane<'a>>,
}

impl<'a> BoardView<'a> {
    /// Joins the board's tasks to its columns.
    ///
    /// Column references are compared in slug form so `"In Progress"` and
    /// `"in-progress"` name the same lane. Tasks pointing at a column that
    /// is not on this board appear in no lane.
    pub fn compose(board_id: &'a str, columns: &'a ColumnStore, tasks: &'a TaskStore) -> Self {
        let board_tasks = tasks.tasks_by_board_id(board_id);

        let lanes = columns
            .columns_by_board_id(board_id)
            .into_iter()
            .map(|column| {
                let key = slugify(&column.id);
                let tasks = board_tasks
                    .iter()
                    .copied()
                    .filter(|task| slugify(&task.column_id) == key)
                    .collect();
                Lane { column, tasks }
            })
            .collect();

        Self { board_id, lanes }
    }

    pub fn task_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.tasks.len()).sum()
    }

    /// True when no lane holds a task; the empty-board prompt is shown
    pub fn is_empty(&self) -> bool {
        self.task_count() == 0
    }

    pub fn lane(&self, column_id: &str) -> Option<&Lane<'a>> {
        self.lanes.iter().find(|lane| lane.column.id == column_id)
    }
}

/// Card footer text, e.g. `1 out of 2 subtasks completed`
pub fn subtask_summary(task: &Task) -> Option<String> {
    if task.subtasks.is_empty() {
        return None;
    }
    Some(format!(
        "{} out of {} subtasks completed",
        task.completed_subtask_count(),
        task.subtasks.len()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stores() -> (ColumnStore, TaskStore) {
        let mut columns = ColumnStore::new();
        columns.set_columns(vec![
            Column::new("todo", "b1", "TODO", "#49C4E5"),
            Column::new("in-progress", "b1", "IN_PROGRESS", "#635fc7"),
            Column::new("done", "b1", "DONE", "#67E2AE"),
            Column::new("todo-b2", "b2", "TODO", "#49C4E5"),
        ]);

        let mut tasks = TaskStore::new();
        tasks.set_tasks(vec![
            Task::new("t1", "b1", "In Progress", "Build")
                .with_subtask("s1", "One")
                .with_subtask("s2", "Two"),
            Task::new("t2", "b1", "done", "Ship"),
            Task::new("t3", "b1", "todo", "Plan"),
            Task::new("t4", "b2", "todo-b2", "Other board"),
        ]);

        (columns, tasks)
    }

    #[test]
    fn test_compose_joins_tasks_to_columns() {
        let (columns, tasks) = stores();
        let view = BoardView::compose("b1", &columns, &tasks);

        assert_eq!(view.lanes.len(), 3);
        assert_eq!(view.task_count(), 3);

        let doing = view.lane("in-progress").unwrap();
        assert_eq!(doing.tasks.len(), 1);
        assert_eq!(doing.tasks[0].id, "t1");
        assert_eq!(doing.heading(), "IN_PROGRESS (1)");
    }

    #[test]
    fn test_compose_unknown_board_is_empty() {
        let (columns, tasks) = stores();
        let view = BoardView::compose("unknown-board", &columns, &tasks);

        assert!(view.lanes.is_empty());
        assert!(view.is_empty());
    }

    #[test]
    fn test_compose_reflects_moves() {
        let (columns, mut tasks) = stores();
        tasks.update_task_status("t3", "done");

        let view = BoardView::compose("b1", &columns, &tasks);
        assert!(view.lane("todo").unwrap().tasks.is_empty());
        assert_eq!(view.lane("done").unwrap().tasks.len(), 2);
    }

    #[test]
    fn test_subtask_summary() {
        let (_, mut tasks) = stores();
        tasks.set_subtask_completion("t1", "s1");

        let task = tasks.task_by_id("t1").unwrap();
        assert_eq!(
            subtask_summary(task).as_deref(),
            Some("1 out of 2 subtasks completed")
        );
        assert_eq!(subtask_summary(tasks.task_by_id("t2").unwrap()), None);
    }
}
