//! Error types for board validation, permissions, and stamp ordering.

use thiserror::Error;

/// Errors returned while validating create-task input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The creator name is empty after trimming.
    #[error("task creator must not be empty")]
    EmptyCreator,

    /// The priority is not one of `alta`, `média`, `baixa`.
    #[error("invalid priority '{0}', expected alta, média or baixa")]
    InvalidPriority(String),

    /// The due date is malformed or not a real calendar date.
    #[error("invalid due date '{0}', expected a real date as DDMMAAAA (e.g. 15052025)")]
    InvalidDueDate(String),
}

/// Role-gated actions that only managers may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedAction {
    /// Applying the `Aprovado` stamp.
    Approve,
    /// Creating a task.
    CreateTask,
    /// Removing a dynamic column.
    RemoveColumn,
}

impl GatedAction {
    /// Returns the user-facing refusal message for the action.
    #[must_use]
    pub const fn refusal(self) -> &'static str {
        match self {
            Self::Approve => "only managers may approve.",
            Self::CreateTask => "only managers may create tasks.",
            Self::RemoveColumn => "only managers may remove columns.",
        }
    }
}

/// A role-gated action was attempted by a disallowed role.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{}", action.refusal())]
pub struct PermissionError {
    /// The refused action.
    pub action: GatedAction,
}

impl PermissionError {
    /// Creates a permission error for the given action.
    #[must_use]
    pub const fn new(action: GatedAction) -> Self {
        Self { action }
    }
}

/// A stamp was requested out of its required order.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PreconditionError {
    /// `Aprovado` requested before `Verificado`.
    #[error("add a VERIFY stamp before APPROVE.")]
    VerifyBeforeApprove,

    /// `Concluído` requested before both earlier stamps.
    #[error("task must be VERIFIED and APPROVED before completion.")]
    ReviewBeforeCompletion,
}

/// Reasons the stamp workflow refuses a request.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StampError {
    /// The requester's role may not apply the stamp.
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// Earlier stamps are missing.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

/// Error returned while parsing a column identifier.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("column identifier must not be empty")]
pub struct ColumnIdError;

/// Error returned while parsing a stamp label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown stamp: {0}")]
pub struct ParseStampError(pub String);

/// Error returned while parsing a role label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
