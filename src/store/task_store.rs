use crate::domain::task::{NewTask, Subtask, Task, TaskPatch};
use crate::error::{KanbanError, Result};
use crate::store::column_store::ColumnStore;
use crate::store::notify::Notifier;
use tokio::sync::watch;
use tracing::{debug, info};

/// Task collection; subtasks are mutated through their parent task
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    notifier: Notifier,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Replaces the whole collection
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        debug!(count = tasks.len(), "replacing tasks");
        self.tasks = tasks;
        self.notifier.notify();
    }

    pub fn add_task(&mut self, task: Task) {
        debug!(task_id = %task.id, column_id = %task.column_id, "adding task");
        self.tasks.push(task);
        self.notifier.notify();
    }

    /// Validates a form draft and appends the resulting task.
    ///
    /// The draft's status must name a column of `board_id`.
    pub fn create_task(
        &mut self,
        draft: NewTask,
        board_id: &str,
        columns: &ColumnStore,
    ) -> Result<Task> {
        draft.validate()?;

        let column = columns
            .column_by_status(board_id, &draft.status)
            .ok_or_else(|| {
                KanbanError::validation(
                    "Status",
                    format!("No column found for status '{}'", draft.status),
                )
            })?;

        let task = draft.into_task(board_id, &column.id);
        info!(task_id = %task.id, %board_id, column_id = %task.column_id, "task created");
        self.add_task(task.clone());
        Ok(task)
    }

    pub fn remove_task(&mut self, task_id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);

        if self.tasks.len() != before {
            debug!(%task_id, "removed task");
            self.notifier.notify();
        }
    }

    pub fn update_task(&mut self, task_id: &str, patch: TaskPatch) {
        match self.task_mut(task_id) {
            Some(task) => {
                task.apply(patch);
                self.notifier.notify();
            }
            None => debug!(%task_id, "update_task: unknown task ignored"),
        }
    }

    /// Moves a task to another column. The column is not checked against
    /// the task's board; see [`TaskStore::move_task_checked`].
    pub fn update_task_status(&mut self, task_id: &str, column_id: &str) {
        match self.task_mut(task_id) {
            Some(task) => {
                task.set_column(column_id);
                debug!(%task_id, %column_id, "task moved");
                self.notifier.notify();
            }
            None => debug!(%task_id, "update_task_status: unknown task ignored"),
        }
    }

    /// Moves a task only if the target column exists on the task's board
    pub fn move_task_checked(
        &mut self,
        task_id: &str,
        column_id: &str,
        columns: &ColumnStore,
    ) -> Result<()> {
        let board_id = self
            .task_by_id(task_id)
            .map(|t| t.board_id.clone())
            .ok_or_else(|| KanbanError::TaskNotFound(task_id.to_string()))?;

        let column = columns
            .column_by_id(column_id)
            .ok_or_else(|| KanbanError::ColumnNotFound(column_id.to_string()))?;

        if column.board_id != board_id {
            return Err(KanbanError::ColumnNotInBoard {
                column_id: column_id.to_string(),
                board_id,
            });
        }

        self.update_task_status(task_id, column_id);
        Ok(())
    }

    pub fn task_by_id(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn tasks_by_board_id(&self, board_id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.board_id == board_id).collect()
    }

    pub fn tasks_by_column_id(&self, column_id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.column_id == column_id).collect()
    }

    /// Subtasks of a task; empty when the task is unknown
    pub fn subtasks_by_id(&self, task_id: &str) -> &[Subtask] {
        self.task_by_id(task_id)
            .map(|t| t.subtasks.as_slice())
            .unwrap_or_default()
    }

    /// Flips `is_completed` on one subtask. No-op if either id misses.
    pub fn set_subtask_completion(&mut self, task_id: &str, subtask_id: &str) {
        let toggled = self
            .task_mut(task_id)
            .map(|t| t.toggle_subtask(subtask_id))
            .unwrap_or(false);

        if toggled {
            self.notifier.notify();
        } else {
            debug!(%task_id, %subtask_id, "set_subtask_completion: no matching subtask");
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }
}
