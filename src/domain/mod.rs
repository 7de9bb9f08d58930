pub mod actions;
pub mod board;
pub mod edit;
pub mod task;

pub use actions::{
    begin_drag, begin_edit, commit_edit, create_task, delete_task, drop_task, DragPayload,
};
pub use board::{Board, ColumnId};
pub use edit::{EditCursor, EditState};
pub use task::{IdSource, SequentialIdSource, Task, TaskId, TimestampIdSource};
