use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskboardError>;

#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("Malformed persisted state: {0}")]
    MalformedState(String),

    #[error("Task {task_id} not found in column {column}")]
    StaleReference { column: String, task_id: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
