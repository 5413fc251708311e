//! Role-gated stamp workflow.
//!
//! Stamps accumulate in the strict order `Verificado` ≺ `Aprovado` ≺
//! `Concluído`. Each request adds at most one stamp and may move the task:
//!
//! | Stamp        | Requires                  | Role    | Column effect              |
//! |--------------|---------------------------|---------|----------------------------|
//! | `Verificado` | nothing                   | any     | to `waitingApproval`       |
//! | `Aprovado`   | `Verificado`              | manager | to `inProgress`            |
//! | `Concluído`  | `Verificado`, `Aprovado`  | any     | completed, archive entry   |
//!
//! Checks run role first, then ordering, then idempotence, so a repeated
//! request never masks a permission failure.

use super::{
    ColumnId, GatedAction, PermissionError, PreconditionError, Role, Stamp, StampError, Task,
    prerequisites,
};

/// Outcome of planning a stamp request against a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampPlan {
    /// The stamp is already present; nothing changes.
    AlreadyApplied,
    /// The stamp will be added with the described effects.
    Apply(StampTransition),
}

/// Effects of adding one stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampTransition {
    /// Stamp to add.
    pub stamp: Stamp,
    /// Column the task moves to, when it is not already there.
    pub move_to: Option<ColumnId>,
    /// Whether the task becomes completed and enters the archive.
    pub completes: bool,
}

/// Decides whether `role` may add `stamp` to `task` and what follows.
///
/// Pure: the task is not modified.
///
/// # Errors
///
/// Returns [`StampError::Permission`] when the role may not request the
/// stamp, or [`StampError::Precondition`] when earlier stamps are missing.
pub fn plan_stamp(task: &Task, role: Role, stamp: Stamp) -> Result<StampPlan, StampError> {
    if !role.may_request(stamp) {
        return Err(PermissionError::new(GatedAction::Approve).into());
    }

    let stamps = task.stamps();
    let satisfied = prerequisites(stamp)
        .iter()
        .all(|required| stamps.contains(*required));
    if !satisfied {
        return Err(missing_prerequisite(stamp).into());
    }

    if stamps.contains(stamp) {
        return Ok(StampPlan::AlreadyApplied);
    }

    let transition = match stamp {
        Stamp::Verified => StampTransition {
            stamp,
            move_to: relocate(task, ColumnId::WaitingApproval),
            completes: false,
        },
        Stamp::Approved => StampTransition {
            stamp,
            move_to: relocate(task, ColumnId::InProgress),
            completes: false,
        },
        Stamp::Completed => StampTransition {
            stamp,
            move_to: relocate(task, ColumnId::Completed),
            completes: true,
        },
    };
    Ok(StampPlan::Apply(transition))
}

fn relocate(task: &Task, target: ColumnId) -> Option<ColumnId> {
    (task.column() != &target).then_some(target)
}

const fn missing_prerequisite(stamp: Stamp) -> PreconditionError {
    match stamp {
        Stamp::Verified | Stamp::Approved => PreconditionError::VerifyBeforeApprove,
        Stamp::Completed => PreconditionError::ReviewBeforeCompletion,
    }
}
