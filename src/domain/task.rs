use crate::domain::id::generate_id;
use crate::error::{KanbanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Checklist item owned by a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: String,
    pub task_id: String,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Subtask {
    pub fn new(
        id: impl Into<String>,
        task_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            task_id: task_id.into(),
            title: title.into(),
            is_completed: false,
            completed_at: None,
        }
    }

    pub fn mark_completed(&mut self) {
        self.is_completed = true;
        self.completed_at = Some(Utc::now());
    }

    pub fn mark_incomplete(&mut self) {
        self.is_completed = false;
        self.completed_at = None;
    }

    pub fn toggle(&mut self) {
        if self.is_completed {
            self.mark_incomplete();
        } else {
            self.mark_completed();
        }
    }
}

/// A work item on a board. It sits in exactly one column at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub board_id: String,
    pub column_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task with no description and no subtasks
    pub fn new(
        id: impl Into<String>,
        board_id: impl Into<String>,
        column_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            board_id: board_id.into(),
            column_id: column_id.into(),
            title: title.into(),
            description: String::new(),
            subtasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a subtask owned by this task
    pub fn with_subtask(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        let subtask = Subtask::new(id, self.id.clone(), title);
        self.subtasks.push(subtask);
        self
    }

    /// Moves the task to another column
    pub fn set_column(&mut self, column_id: impl Into<String>) {
        self.column_id = column_id.into();
        self.updated_at = Utc::now();
    }

    /// Toggles the subtask with the given id. Returns false if none matched.
    pub fn toggle_subtask(&mut self, subtask_id: &str) -> bool {
        match self.subtasks.iter_mut().find(|s| s.id == subtask_id) {
            Some(subtask) => {
                subtask.toggle();
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn completed_subtask_count(&self) -> usize {
        self.subtasks.iter().filter(|s| s.is_completed).count()
    }

    /// Applies every field present in the patch
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(board_id) = patch.board_id {
            self.board_id = board_id;
        }
        if let Some(column_id) = patch.column_id {
            self.column_id = column_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(subtasks) = patch.subtasks {
            self.subtasks = subtasks;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update for a task. The id is never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub board_id: Option<String>,
    pub column_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtasks: Option<Vec<Subtask>>,
}

impl TaskPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// User input from the "add new task" form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subtasks: Vec<String>,
    /// Status of the column the task should start in
    pub status: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: status.into(),
            ..Self::default()
        }
    }

    /// Checks the required fields
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(KanbanError::validation("Title", "Task title is required"));
        }
        if self.status.trim().is_empty() {
            return Err(KanbanError::validation("Status", "Status is required"));
        }
        Ok(())
    }

    /// Builds the task with fresh ids. Blank subtask titles are dropped.
    pub fn into_task(self, board_id: &str, column_id: &str) -> Task {
        let task_id = generate_id();
        let subtasks = self
            .subtasks
            .into_iter()
            .filter(|title| !title.trim().is_empty())
            .map(|title| Subtask::new(generate_id(), task_id.clone(), title))
            .collect();

        let mut task = Task::new(task_id, board_id, column_id, self.title)
            .with_description(self.description);
        task.subtasks = subtasks;
        task
    }
}
