//! In-memory key-value store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::ports::{KeyValueStore, KeyValueStoreError, KeyValueStoreResult};

/// Thread-safe in-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    records: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with records.
    #[must_use]
    pub fn with_records<K, V>(records: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = records
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            records: Arc::new(RwLock::new(entries)),
        }
    }
}

fn poisoned(err: &impl ToString) -> KeyValueStoreError {
    KeyValueStoreError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> KeyValueStoreResult<Option<String>> {
        let records = self.records.read().map_err(|err| poisoned(&err))?;
        Ok(records.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> KeyValueStoreResult<()> {
        let mut records = self.records.write().map_err(|err| poisoned(&err))?;
        records.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> KeyValueStoreResult<()> {
        let mut records = self.records.write().map_err(|err| poisoned(&err))?;
        records.remove(key);
        Ok(())
    }
}
