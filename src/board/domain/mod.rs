//! Domain model for the task board.
//!
//! The domain covers task creation, column membership, the stamp approval
//! workflow, priority ordering, and view partitioning while keeping storage
//! and session concerns outside the domain boundary.

mod board;
mod due_date;
mod error;
mod ids;
mod priority;
mod stamp;
mod task;
mod view;
mod workflow;

pub use board::{Board, MoveOutcome, StampOutcome};
pub use due_date::DueDate;
pub use error::{
    ColumnIdError, GatedAction, ParseRoleError, ParseStampError, PermissionError,
    PreconditionError, StampError, TaskValidationError,
};
pub use ids::{ColumnId, DynamicColumnId, TaskId};
pub use priority::{Priority, sort_by_priority};
pub use stamp::{Role, Stamp, StampSet, prerequisites};
pub use task::{CompletedEntry, NewTask, PersistedTaskData, Task};
pub use view::{BoardView, ColumnView, build_view, display_bucket};
pub use workflow::{StampPlan, StampTransition, plan_stamp};
