use crate::{
    domain::{
        actions,
        board::{Board, ColumnId},
        edit::{EditCursor, EditState},
        task::{IdSource, TaskId, TimestampIdSource},
        DragPayload,
    },
    error::{Result, TaskboardError},
    storage::Storage,
};
use serde::{Deserialize, Serialize};

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key of the storage slot holding the board
    pub storage_key: String,
}

impl StoreConfig {
    pub const DEFAULT_STORAGE_KEY: &'static str = "tasks";
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Owned copy of everything a view needs to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub board: Board,
    pub cursor: EditCursor,
}

/// Owner of the live board.
///
/// Holds the only mutable board, the edit cursor and the id source, runs the
/// reducers on behalf of the view and writes the board to storage after every
/// change. No operation fails: stale references are no-ops and storage errors
/// are logged. A board that could not be written stays dirty and is written
/// again by the next operation, even one that changes nothing.
pub struct BoardStore {
    board: Board,
    dirty: bool,
    cursor: EditCursor,
    storage: Box<dyn Storage>,
    ids: Box<dyn IdSource>,
    config: StoreConfig,
}

impl BoardStore {
    /// Loads the persisted board, or starts with three empty columns when
    /// nothing usable is stored.
    pub fn initialize(storage: impl Storage + 'static, config: StoreConfig) -> Self {
        // Absent or malformed state is replaced on disk by the empty board.
        // A failed read is left alone so a transient error cannot clobber it.
        let (board, dirty) = match load_board(&storage, &config.storage_key) {
            Ok(Some(board)) => {
                tracing::info!(key = %config.storage_key, tasks = board.len(), "Loaded board");
                (board, false)
            }
            Ok(None) => {
                tracing::info!(key = %config.storage_key, "No saved board, starting empty");
                (Board::default(), true)
            }
            Err(e @ (TaskboardError::MalformedState(_) | TaskboardError::DuplicateTaskId(_))) => {
                tracing::warn!(
                    key = %config.storage_key,
                    error = %e,
                    "Discarding malformed saved board"
                );
                (Board::default(), true)
            }
            Err(e) => {
                tracing::warn!(
                    key = %config.storage_key,
                    error = %e,
                    "Could not read saved board, starting empty"
                );
                (Board::default(), false)
            }
        };

        let mut store = Self {
            board,
            dirty,
            cursor: EditCursor::idle(),
            storage: Box::new(storage),
            ids: Box::new(TimestampIdSource::new()),
            config,
        };
        if store.dirty {
            store.persist();
        }
        store
    }

    /// Replaces the id source used for new tasks
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> &EditCursor {
        &self.cursor
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            board: self.board.clone(),
            cursor: self.cursor.clone(),
        }
    }

    pub fn create_task(&mut self, column: ColumnId, raw_name: &str) -> &Board {
        let next = actions::create_task(&self.board, column, raw_name, self.ids.as_mut());
        self.apply(next)
    }

    pub fn begin_drag(&self, task_id: TaskId, column: ColumnId) -> DragPayload {
        actions::begin_drag(task_id, column)
    }

    pub fn drop_task(&mut self, payload: DragPayload, target: ColumnId) -> &Board {
        let next = actions::drop_task(&self.board, payload, target);
        self.apply(next)
    }

    pub fn delete_task(&mut self, column: ColumnId, task_id: TaskId) -> &Board {
        let next = actions::delete_task(&self.board, column, task_id);
        self.apply(next)
    }

    /// Starts renaming a task, replacing any edit already in progress
    pub fn begin_edit(&mut self, task_id: TaskId, current_name: &str) -> &EditCursor {
        self.cursor = actions::begin_edit(task_id, current_name);
        &self.cursor
    }

    /// Changes the draft text of the edit in progress; ignored when idle
    pub fn update_draft(&mut self, text: &str) -> bool {
        self.cursor.set_draft(text)
    }

    /// Commits the cursor's draft as the task's name and returns to idle.
    ///
    /// Ignored unless the cursor is editing `task_id`, so a second trigger
    /// for the same edit (Enter followed by blur) cannot rename the task to
    /// the cleared draft.
    pub fn commit_edit(&mut self, column: ColumnId, task_id: TaskId) -> BoardSnapshot {
        if self.cursor.state() != EditState::Editing(task_id) {
            tracing::debug!(%column, %task_id, "No edit in progress for task");
            return self.snapshot();
        }
        let (next, cursor) =
            actions::commit_edit(&self.board, column, task_id, self.cursor.draft_text());
        self.cursor = cursor;
        self.apply(next);
        self.snapshot()
    }

    fn apply(&mut self, next: Board) -> &Board {
        if next != self.board {
            self.board = next;
            self.dirty = true;
        }
        if self.dirty {
            self.persist();
        }
        &self.board
    }

    fn persist(&mut self) {
        let written = self
            .board
            .to_json()
            .and_then(|json| self.storage.write(&self.config.storage_key, &json));
        match written {
            Ok(()) => self.dirty = false,
            Err(e) => {
                tracing::warn!(key = %self.config.storage_key, error = %e, "Failed to save board");
                self.dirty = true;
            }
        }
    }
}

fn load_board(storage: &dyn Storage, key: &str) -> Result<Option<Board>> {
    storage
        .read(key)?
        .map(|contents| Board::from_json(&contents))
        .transpose()
}
