use crate::{
    error::{Result, TaskboardError},
    storage::Storage,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::{path::Path, sync::Mutex};

/// SQLite-backed storage keeping every slot as a row of a single `kv` table
pub struct SqliteStorage {
    connection: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `database_path`
    pub fn new(database_path: impl AsRef<Path>) -> Result<Self> {
        Self::from_connection(Connection::open(database_path).map_err(sqlite_error)?)
    }

    /// A private in-memory database
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory().map_err(sqlite_error)?)
    }

    fn from_connection(connection: Connection) -> Result<Self> {
        connection
            .execute(
                "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL)",
                [],
            )
            .map_err(sqlite_error)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let connection = self.connection.lock().map_err(|e| {
            TaskboardError::StorageError(format!("sqlite connection lock poisoned: {}", e))
        })?;
        f(&connection).map_err(sqlite_error)
    }
}

fn sqlite_error(err: rusqlite::Error) -> TaskboardError {
    TaskboardError::StorageError(err.to_string())
}

impl Storage for SqliteStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
        })
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
        })
    }
}
