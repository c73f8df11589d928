pub mod board;
pub mod column;
pub mod id;
pub mod task;

pub use board::{board_route, Board};
pub use column::{default_columns, Column, ColumnPatch};
pub use id::{generate_id, slugify};
pub use task::{NewTask, Subtask, Task, TaskPatch};
