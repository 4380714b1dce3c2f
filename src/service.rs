//! Service abstraction
//!
//! The capability the connection handler needs from storage. The handler
//! only ever sees a `Service`, so any backing store (or a test double) can
//! sit behind the protocol code.

use std::sync::Arc;

use crate::error::Result;
use crate::store::KeyValueStore;

/// Storage operations reachable from the wire protocol
pub trait Service: Send + Sync {
    /// Insert or overwrite `key`
    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()>;

    /// Look up `key`; `Ok(None)` when absent
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
}

impl Service for KeyValueStore {
    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        KeyValueStore::set(self, key, value)
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        KeyValueStore::get(self, key)
    }
}

impl<S: Service + ?Sized> Service for Arc<S> {
    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value)
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }
}
