//! Task priority levels and the single ordering used by every view.

use super::TaskValidationError;
use std::cmp::Ordering;
use std::fmt;

/// Priority level of a task.
///
/// New tasks always carry one of the three ranked levels. Persisted tasks
/// may carry a label this build does not recognise; such tasks are kept and
/// sort after every ranked level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Priority {
    /// `alta`.
    High,
    /// `média`.
    Medium,
    /// `baixa`.
    Low,
    /// Any other persisted label, normalised to lowercase.
    Unranked(String),
}

impl Priority {
    /// Parses a priority for a new task.
    ///
    /// Input is trimmed and compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::InvalidPriority`] for anything other
    /// than `alta`, `média` or `baixa`.
    pub fn parse(value: &str) -> Result<Self, TaskValidationError> {
        match Self::from_label(value) {
            Self::Unranked(_) => Err(TaskValidationError::InvalidPriority(value.to_owned())),
            ranked => Ok(ranked),
        }
    }

    /// Interprets a persisted label without rejecting unknown values.
    #[must_use]
    pub fn from_label(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "alta" => Self::High,
            "média" => Self::Medium,
            "baixa" => Self::Low,
            _ => Self::Unranked(normalized),
        }
    }

    /// Returns the canonical lowercase label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "alta",
            Self::Medium => "média",
            Self::Low => "baixa",
            Self::Unranked(label) => label,
        }
    }

    /// Returns the numeric rank: 3 for `alta` down to 0 for unranked.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::Unranked(_) => 0,
        }
    }

    /// Orders higher priorities first.
    ///
    /// Equal ranks compare as equal, so a stable sort keeps their relative
    /// input order.
    #[must_use]
    pub fn compare(a: &Self, b: &Self) -> Ordering {
        b.rank().cmp(&a.rank())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable-sorts items by priority, highest first.
pub fn sort_by_priority<T>(items: &mut [T], priority: impl Fn(&T) -> &Priority) {
    items.sort_by(|a, b| Priority::compare(priority(a), priority(b)));
}
