//! Validated task due dates.

use super::TaskValidationError;
use chrono::NaiveDate;
use std::fmt;

const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Calendar date by which a task is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(NaiveDate);

impl DueDate {
    /// Wraps an already valid calendar date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a due date entered as `DDMMAAAA`, `DD/MM/AAAA` or `AAAA-MM-DD`.
    ///
    /// Impossible dates such as 30 February are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::InvalidDueDate`] when the value matches
    /// none of the accepted forms or names no real date.
    pub fn parse(value: &str) -> Result<Self, TaskValidationError> {
        let trimmed = value.trim();
        let is_compact = trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit());
        let parsed = if is_compact {
            NaiveDate::parse_from_str(trimmed, "%d%m%Y")
        } else if trimmed.contains('/') {
            NaiveDate::parse_from_str(trimmed, DISPLAY_FORMAT)
        } else {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        };
        parsed
            .map(Self)
            .map_err(|_| TaskValidationError::InvalidDueDate(value.to_owned()))
    }

    /// Returns the wrapped date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}
