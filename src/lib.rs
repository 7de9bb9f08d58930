//! # Taskboard Core
//!
//! State and persistence for a three-column kanban task tracker.
//!
//! The board is an explicitly owned value mutated only through a small set of
//! reducers (create, drag, drop, delete, edit). [`BoardStore`] owns the board
//! together with the transient edit cursor and writes a snapshot to a
//! key-value [`Storage`] slot after every mutation. Rendering is left to the
//! caller, which reads snapshots and forwards user events.

pub mod domain;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use domain::{
    actions::DragPayload,
    board::{Board, ColumnId},
    edit::{EditCursor, EditState},
    task::{IdSource, SequentialIdSource, Task, TaskId, TimestampIdSource},
};
pub use error::{Result, TaskboardError};
pub use storage::Storage;
pub use store::{BoardSnapshot, BoardStore, StoreConfig};
