//! The board reducers.
//!
//! Each reducer takes the current board by reference and returns a new one,
//! so a previously handed-out snapshot is never modified. Every reducer is
//! total: blank names and stale references degrade to returning an unchanged
//! copy of the input.

use crate::domain::{
    board::{Board, ColumnId},
    edit::EditCursor,
    task::{IdSource, Task, TaskId},
};
use serde::{Deserialize, Serialize};

/// What a drag gesture carries from its source to the drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    pub task_id: TaskId,
    pub column: ColumnId,
}

/// Appends a new task named `raw_name` (trimmed) to the end of `column`.
///
/// A blank or whitespace-only name leaves the board unchanged.
pub fn create_task<I>(board: &Board, column: ColumnId, raw_name: &str, ids: &mut I) -> Board
where
    I: IdSource + ?Sized,
{
    let name = raw_name.trim();
    if name.is_empty() {
        tracing::debug!(%column, "Ignoring task with blank name");
        return board.clone();
    }

    // Never collide with an id already on the board, e.g. one loaded from a
    // snapshot written by a machine with a faster clock.
    let candidate = ids.next_id();
    let id = match board.max_task_id() {
        Some(max) if candidate <= max => max.successor(),
        _ => candidate,
    };

    let mut next = board.clone();
    next.push_task(column, Task::new(id, name));
    tracing::debug!(%column, task_id = %id, "Created task");
    next
}

/// Captures the source of a drag gesture. Does not touch the board.
pub fn begin_drag(task_id: TaskId, column: ColumnId) -> DragPayload {
    DragPayload { task_id, column }
}

/// Moves the dragged task to the end of `target`.
///
/// Dropping onto the source column re-appends the task, making it the last
/// one in that column. A payload whose task is no longer in its source column
/// is ignored.
pub fn drop_task(board: &Board, payload: DragPayload, target: ColumnId) -> Board {
    let mut next = board.clone();
    match next.remove_task(payload.column, payload.task_id) {
        Ok(task) => {
            next.push_task(target, task);
            tracing::debug!(
                task_id = %payload.task_id,
                from = %payload.column,
                to = %target,
                "Moved task"
            );
            next
        }
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring stale drop");
            board.clone()
        }
    }
}

/// Removes the task from `column` if it is there
pub fn delete_task(board: &Board, column: ColumnId, task_id: TaskId) -> Board {
    let mut next = board.clone();
    match next.remove_task(column, task_id) {
        Ok(_) => tracing::debug!(%column, %task_id, "Deleted task"),
        Err(e) => tracing::debug!(error = %e, "Nothing to delete"),
    }
    next
}

/// Starts an inline rename seeded with the task's current name
pub fn begin_edit(task_id: TaskId, current_name: &str) -> EditCursor {
    EditCursor::editing(task_id, current_name)
}

/// Writes `draft_text` as the task's new name and clears the edit cursor.
///
/// The draft is stored verbatim: unlike [`create_task`] there is no trimming
/// and an empty draft produces an empty name. The cursor is cleared even when
/// the task is no longer in `column`.
pub fn commit_edit(
    board: &Board,
    column: ColumnId,
    task_id: TaskId,
    draft_text: &str,
) -> (Board, EditCursor) {
    let mut next = board.clone();
    match next.task_mut(column, task_id) {
        Ok(task) => {
            task.rename(draft_text);
            tracing::debug!(%column, %task_id, "Renamed task");
        }
        Err(e) => tracing::debug!(error = %e, "Ignoring stale edit"),
    }
    (next, EditCursor::idle())
}
