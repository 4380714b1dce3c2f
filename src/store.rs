//! Store Module
//!
//! The in-memory key-value map shared by every connection.
//!
//! ## Concurrency Model
//! One exclusive lock covers the whole map. Reads and writes both take it,
//! so every operation is atomic with respect to the entire store and all
//! operations are totally ordered by lock acquisition. The lock is held for
//! a single call only, never across I/O.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{QuickDbError, Result};

/// Thread-safe in-memory key-value store
pub struct KeyValueStore {
    /// All entries, guarded by one exclusive lock
    data: Mutex<HashMap<Vec<u8>, Vec<u8>>>,

    /// Max number of distinct keys (None = unlimited)
    max_entries: Option<usize>,
}

impl KeyValueStore {
    /// Create an empty, unbounded store
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            max_entries: None,
        }
    }

    /// Create an empty store that rejects new keys past `limit`
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            max_entries: Some(limit),
        }
    }

    /// Create a store honoring the configured capacity limit
    pub fn from_config(config: &Config) -> Self {
        match config.max_entries {
            Some(limit) => Self::with_capacity_limit(limit),
            None => Self::new(),
        }
    }

    /// Insert or overwrite an entry
    ///
    /// Overwrites always succeed; a new key fails with `StoreFull` once the
    /// capacity limit is reached.
    pub fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        let mut data = self.data.lock();

        if let Some(limit) = self.max_entries {
            if data.len() >= limit && !data.contains_key(&key) {
                return Err(QuickDbError::StoreFull { limit });
            }
        }

        data.insert(key, value);
        Ok(())
    }

    /// Get a copy of the value for `key`
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.lock().get(key).cloned())
    }

    /// Remove an entry, returning whether it existed
    pub fn delete(&self, key: &[u8]) -> bool {
        self.data.lock().remove(key).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.data.lock().clear();
    }

    /// Configured capacity limit
    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }
}

impl Default for KeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}
