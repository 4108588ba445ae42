//! Key-value persistence
//!
//! The game stores two strings: the best score and the display settings.
//! Browsers back this with LocalStorage (`platform::storage`); tests and the
//! native build use the in-memory store.

use std::collections::HashMap;

use crate::error::StorageError;

/// String key-value storage
pub trait KeyValueStore {
    /// Read a value; missing keys and unreadable storage both yield `None`
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    /// Reject every write (simulates a full or disabled backend)
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail
    pub fn read_only() -> Self {
        Self {
            values: HashMap::new(),
            read_only: true,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::WriteRejected(key.to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
