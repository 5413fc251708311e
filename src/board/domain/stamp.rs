//! Review stamps, accumulated stamp sets, and requester roles.

use super::{ParseRoleError, ParseStampError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval-stage marker applied to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stamp {
    /// The work has been checked.
    #[serde(rename = "Verificado")]
    Verified,
    /// A manager has approved the verified work.
    #[serde(rename = "Aprovado")]
    Approved,
    /// The task is done.
    #[serde(rename = "Concluído")]
    Completed,
}

impl Stamp {
    /// All stamps in their required application order.
    pub const ALL: [Self; 3] = [Self::Verified, Self::Approved, Self::Completed];

    /// Returns the label shown on the stamp and used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "Verificado",
            Self::Approved => "Aprovado",
            Self::Completed => "Concluído",
        }
    }

    /// Returns the stamps a role may request.
    #[must_use]
    pub fn available_to(role: Role) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|stamp| role.may_request(*stamp))
            .collect()
    }
}

impl TryFrom<&str> for Stamp {
    type Error = ParseStampError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Verificado" => Ok(Self::Verified),
            "Aprovado" => Ok(Self::Approved),
            "Concluído" => Ok(Self::Completed),
            _ => Err(ParseStampError(value.to_owned())),
        }
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stamps accumulated on a task, in the order they were applied.
///
/// The set only grows and holds each stamp at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StampSet(Vec<Stamp>);

impl StampSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Rebuilds a set from persisted stamps, keeping first occurrences.
    #[must_use]
    pub fn from_applied(stamps: impl IntoIterator<Item = Stamp>) -> Self {
        let mut set = Self::new();
        for stamp in stamps {
            set.insert(stamp);
        }
        set
    }

    /// Returns `true` when the stamp has been applied.
    #[must_use]
    pub fn contains(&self, stamp: Stamp) -> bool {
        self.0.contains(&stamp)
    }

    /// Adds a stamp; returns `false` if it was already present.
    pub(crate) fn insert(&mut self, stamp: Stamp) -> bool {
        if self.contains(stamp) {
            return false;
        }
        self.0.push(stamp);
        true
    }

    /// Returns `true` when every stamp's prerequisites were applied before it.
    #[must_use]
    pub fn is_well_ordered(&self) -> bool {
        self.0.iter().enumerate().all(|(position, stamp)| {
            let earlier = self.0.get(..position).unwrap_or_default();
            prerequisites(*stamp)
                .iter()
                .all(|required| earlier.contains(required))
        })
    }

    /// Iterates stamps in application order.
    pub fn iter(&self) -> impl Iterator<Item = Stamp> + '_ {
        self.0.iter().copied()
    }

    /// Returns the number of applied stamps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no stamp has been applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stamps that must already be present before `stamp` may be applied.
#[must_use]
pub const fn prerequisites(stamp: Stamp) -> &'static [Stamp] {
    match stamp {
        Stamp::Verified => &[],
        Stamp::Approved => &[Stamp::Verified],
        Stamp::Completed => &[Stamp::Verified, Stamp::Approved],
    }
}

/// Role of the user issuing commands.
///
/// Serialises as the canonical label and deserialises through
/// [`Role::try_from`], so stored labels accept the same spellings as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Role {
    /// Full permissions (`gerente`).
    #[serde(rename = "gerente")]
    Manager,
    /// Cannot approve, create tasks, or remove columns (`funcionario`).
    #[serde(rename = "funcionario")]
    Employee,
}

impl Role {
    /// Returns the canonical storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "gerente",
            Self::Employee => "funcionario",
        }
    }

    /// Returns `true` for the manager role.
    #[must_use]
    pub const fn is_manager(self) -> bool {
        matches!(self, Self::Manager)
    }

    /// Returns `true` when the role may request the stamp at all.
    #[must_use]
    pub const fn may_request(self, stamp: Stamp) -> bool {
        match stamp {
            Stamp::Approved => self.is_manager(),
            Stamp::Verified | Stamp::Completed => true,
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "gerente" | "manager" => Ok(Self::Manager),
            "funcionario" | "funcionário" | "employee" => Ok(Self::Employee),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ParseRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
