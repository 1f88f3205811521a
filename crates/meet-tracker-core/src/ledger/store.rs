use crate::CoreResult;

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex},
};

/// Asynchronous key-value store holding serialized values.
///
/// No transactions and no version tokens: `set` overwrites whatever is there.
/// Concurrency control lives in [`MeetingLedger`](crate::MeetingLedger).
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> impl Future<Output = CoreResult<Option<String>>> + Send;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: String) -> impl Future<Output = CoreResult<()>> + Send;
}

/// In-process store. Clones share the same underlying map, so two ledgers
/// built over clones behave like two writers on one shared store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.put(key, value);
        store
    }

    /// Synchronously overwrite an entry.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        // Poisoning only means another thread panicked mid-insert; the map is still usable.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.into(), value.into());
    }

    /// Synchronously read an entry.
    pub fn peek(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: String) -> CoreResult<()> {
        self.put(key, value);
        Ok(())
    }
}
