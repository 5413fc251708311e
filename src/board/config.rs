//! Runtime settings for the board.
//!
//! Settings can be supplied through environment variables:
//! - `CORPFLOW_COMPLETED_DISPLAY_LIMIT` - completed tasks returned eagerly
//!   in a board view. Defaults to `5`.
//! - `CORPFLOW_TASKS_KEY` - record holding the task list. Defaults to
//!   `sharedTasks`.
//! - `CORPFLOW_COMPLETED_KEY` - record holding the completed archive.
//!   Defaults to `completedTasks`.
//! - `CORPFLOW_SESSION_KEY` - record holding the signed-in user. Defaults to
//!   `userLogado`.

use thiserror::Error;

/// Errors returned while reading settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting holds a value that cannot be used.
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Rejected value.
        value: String,
    },
}

/// Names of the records kept in the key-value store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Task list record.
    pub tasks: String,
    /// Completed archive record.
    pub completed: String,
    /// Active session record.
    pub session: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            tasks: "sharedTasks".to_owned(),
            completed: "completedTasks".to_owned(),
            session: "userLogado".to_owned(),
        }
    }
}

/// Board settings.
///
/// # Examples
///
/// ```
/// use corpflow::board::config::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.completed_display_limit, 5);
/// assert_eq!(config.keys.tasks, "sharedTasks");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Completed tasks included in a board view; the rest are available
    /// through the full completed listing.
    pub completed_display_limit: usize,
    /// Record names in the key-value store.
    pub keys: StorageKeys,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            completed_display_limit: 5,
            keys: StorageKeys::default(),
        }
    }
}

const DISPLAY_LIMIT_VAR: &str = "CORPFLOW_COMPLETED_DISPLAY_LIMIT";
const TASKS_KEY_VAR: &str = "CORPFLOW_TASKS_KEY";
const COMPLETED_KEY_VAR: &str = "CORPFLOW_COMPLETED_KEY";
const SESSION_KEY_VAR: &str = "CORPFLOW_SESSION_KEY";

impl BoardConfig {
    /// Creates a configuration with a compact completed column.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            completed_display_limit: 4,
            ..Self::default()
        }
    }

    /// Sets the completed display limit.
    #[must_use]
    pub const fn with_completed_display_limit(mut self, limit: usize) -> Self {
        self.completed_display_limit = limit;
        self
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for
    /// unset names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the display limit is not a
    /// non-negative integer or a record key is blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let completed_display_limit = match lookup(DISPLAY_LIMIT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid(DISPLAY_LIMIT_VAR, &raw))?,
            None => defaults.completed_display_limit,
        };
        let keys = StorageKeys {
            tasks: key_setting(&lookup, TASKS_KEY_VAR, defaults.keys.tasks)?,
            completed: key_setting(&lookup, COMPLETED_KEY_VAR, defaults.keys.completed)?,
            session: key_setting(&lookup, SESSION_KEY_VAR, defaults.keys.session)?,
        };
        Ok(Self {
            completed_display_limit,
            keys,
        })
    }
}

fn key_setting(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: String,
) -> Result<String, ConfigError> {
    match lookup(name) {
        Some(raw) if raw.trim().is_empty() => Err(invalid(name, &raw)),
        Some(raw) => Ok(raw.trim().to_owned()),
        None => Ok(default),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}
