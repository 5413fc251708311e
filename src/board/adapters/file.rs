//! Directory-backed key-value store.
//!
//! Each record is stored as `<key>.json` inside a capability directory.
//! Writes go to a temporary sibling first and are renamed into place, so a
//! reader never observes a half-written record.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::board::ports::{KeyValueStore, KeyValueStoreError, KeyValueStoreResult};

/// Key-value store persisting records as files in one directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: Arc<Dir>,
}

impl FileKeyValueStore {
    /// Opens an existing directory as a store.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Backend`] when the directory cannot be
    /// opened.
    pub fn open(path: &Utf8Path) -> KeyValueStoreResult<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(KeyValueStoreError::backend)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub fn from_dir(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }
}

/// Maps a record key to its file name.
///
/// Keys are limited to ASCII letters, digits, `_` and `-` so a key can never
/// name a path outside the store directory.
fn record_file(key: &str) -> KeyValueStoreResult<String> {
    let is_valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if !is_valid {
        return Err(KeyValueStoreError::InvalidKey(key.to_owned()));
    }
    Ok(format!("{key}.json"))
}

async fn run_blocking<F, T>(f: F) -> KeyValueStoreResult<T>
where
    F: FnOnce() -> KeyValueStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(KeyValueStoreError::backend)?
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> KeyValueStoreResult<Option<String>> {
        let file = record_file(key)?;
        let dir = Arc::clone(&self.dir);
        run_blocking(move || match dir.read_to_string(&file) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueStoreError::backend(err)),
        })
        .await
    }

    async fn put(&self, key: &str, value: &str) -> KeyValueStoreResult<()> {
        let file = record_file(key)?;
        let staging = format!("{file}.tmp");
        let contents = value.to_owned();
        let dir = Arc::clone(&self.dir);
        run_blocking(move || {
            dir.write(&staging, contents.as_bytes())
                .map_err(KeyValueStoreError::backend)?;
            dir.rename(&staging, &dir, &file)
                .map_err(KeyValueStoreError::backend)
        })
        .await
    }

    async fn remove(&self, key: &str) -> KeyValueStoreResult<()> {
        let file = record_file(key)?;
        let dir = Arc::clone(&self.dir);
        run_blocking(move || match dir.remove_file(&file) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(KeyValueStoreError::backend(err)),
        })
        .await
    }
}
