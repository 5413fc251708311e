//! Key-value store port used for board and session persistence.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value store operations.
pub type KeyValueStoreResult<T> = Result<T, KeyValueStoreError>;

/// External store holding named text records.
///
/// Board state lives in two records (tasks and completed archive) written
/// after every settled mutation; the active session lives in a third.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a record.
    ///
    /// Returns `None` when no record exists under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend cannot be read.
    async fn get(&self, key: &str) -> KeyValueStoreResult<Option<String>>;

    /// Creates or replaces a record.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend rejects the write.
    async fn put(&self, key: &str, value: &str) -> KeyValueStoreResult<()>;

    /// Deletes a record; deleting a missing record succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend rejects the delete.
    async fn remove(&self, key: &str) -> KeyValueStoreResult<()>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum KeyValueStoreError {
    /// The key cannot name a record in this backend.
    #[error("invalid record key: {0}")]
    InvalidKey(String),

    /// The backend refused or failed the operation.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl KeyValueStoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
