use crate::error::Result;

pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

#[cfg(feature = "sqlite-storage")]
pub use sqlite_storage::SqliteStorage;

/// A key-value slot holding serialized board snapshots.
///
/// Reads and writes are synchronous. A write fully replaces the value under
/// its key.
pub trait Storage: Send + Sync {
    /// Returns the stored text, or `None` if nothing was ever written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
