//! Identifier types for tasks and board columns.

use super::ColumnIdError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-derived, strictly increasing task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the identifier that immediately follows this one.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a manager-created column.
///
/// Only [`ColumnId::parse`] builds one, so the value is always trimmed,
/// non-empty, and never the name of a fixed column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DynamicColumnId(String);

impl DynamicColumnId {
    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DynamicColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Board column a task is stored in.
///
/// The three workflow columns and the completed pseudo-column are fixed and
/// protected; any other identifier names a manager-created dynamic column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnId {
    /// Work not yet started (`todo`).
    Todo,
    /// Verified work awaiting manager approval (`waitingApproval`).
    WaitingApproval,
    /// Approved work being carried out (`inProgress`).
    InProgress,
    /// Terminal pseudo-column for completed tasks (`completed`).
    Completed,
    /// Manager-created column.
    Dynamic(DynamicColumnId),
}

impl ColumnId {
    /// Fixed columns in declaration (render) order.
    pub const FIXED: [Self; 4] = [
        Self::Todo,
        Self::WaitingApproval,
        Self::InProgress,
        Self::Completed,
    ];

    /// Parses a column identifier, treating unknown names as dynamic.
    ///
    /// # Errors
    ///
    /// Returns [`ColumnIdError`] when the identifier is empty after trimming.
    pub fn parse(value: &str) -> Result<Self, ColumnIdError> {
        let trimmed = value.trim();
        match trimmed {
            "" => Err(ColumnIdError),
            "todo" => Ok(Self::Todo),
            "waitingApproval" => Ok(Self::WaitingApproval),
            "inProgress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Ok(Self::Dynamic(DynamicColumnId(other.to_owned()))),
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Todo => "todo",
            Self::WaitingApproval => "waitingApproval",
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
            Self::Dynamic(id) => id.as_str(),
        }
    }

    /// Returns the title shown above the column.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Todo => "A fazer",
            Self::WaitingApproval => "Esperando Aprovação",
            Self::InProgress => "Em andamento",
            Self::Completed => "Concluídas",
            Self::Dynamic(id) => id.as_str(),
        }
    }

    /// Returns `true` for columns that can never be removed.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        !matches!(self, Self::Dynamic(_))
    }
}

impl TryFrom<&str> for ColumnId {
    type Error = ColumnIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
