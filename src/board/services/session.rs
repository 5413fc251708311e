//! Active-user session record.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::board::{
    config::StorageKeys,
    domain::Role,
    ports::{KeyValueStore, KeyValueStoreError},
};

/// The signed-in user issuing board commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name, recorded as the creator of new tasks.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Role deciding which commands are allowed.
    pub role: Role,
}

impl Session {
    /// Creates a session value.
    #[must_use]
    pub fn new(name: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            role,
        }
    }
}

/// Errors returned while reading the session record.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// No user is signed in; the caller should send the user to login.
    #[error("no user is signed in")]
    NotSignedIn,

    /// The session record cannot be interpreted.
    #[error("malformed session record: {0}")]
    Malformed(String),

    /// The store could not be read.
    #[error(transparent)]
    Store(#[from] KeyValueStoreError),
}

/// Reads and clears the active session record.
#[derive(Clone)]
pub struct SessionService<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
    key: String,
}

impl<S> SessionService<S>
where
    S: KeyValueStore,
{
    /// Creates a session service reading the configured session record.
    #[must_use]
    pub fn new(store: Arc<S>, keys: &StorageKeys) -> Self {
        Self {
            store,
            key: keys.session.clone(),
        }
    }

    /// Returns the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotSignedIn`] when no record exists,
    /// [`SessionError::Malformed`] when it cannot be parsed, or
    /// [`SessionError::Store`] when the store fails.
    pub async fn current(&self) -> Result<Session, SessionError> {
        let raw = self
            .store
            .get(&self.key)
            .await?
            .ok_or(SessionError::NotSignedIn)?;
        serde_json::from_str(&raw).map_err(|err| SessionError::Malformed(err.to_string()))
    }

    /// Clears the session record.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the store rejects the delete.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.store.remove(&self.key).await?;
        debug!(key = %self.key, "session record cleared");
        Ok(())
    }
}
