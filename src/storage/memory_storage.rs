use crate::{
    error::{Result, TaskboardError},
    storage::Storage,
};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// In-process storage. Clones share the same slots, so a caller can keep a
/// handle to inspect what a store has written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.write() {
            slots.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskboardError {
    TaskboardError::StorageError(format!("memory storage lock poisoned: {}", err))
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.read().map_err(poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.write().map_err(poisoned)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
