//! Board aggregate: the task store and its completed archive.

use super::{
    ColumnId, CompletedEntry, NewTask, Role, Stamp, StampError, StampPlan, Task, TaskId,
    plan_stamp, sort_by_priority,
};
use mockable::Clock;

/// Result of a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task now sits in the target column.
    Moved(Task),
    /// Nothing changed: unknown task, same column, completed task, or a
    /// move into the completed pseudo-column.
    Unchanged,
}

/// Result of an accepted stamp request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampOutcome {
    /// The stamp was added; carries the updated task.
    Applied(Task),
    /// The stamp was already present.
    AlreadyApplied,
    /// No task has the requested identifier.
    TaskNotFound,
}

/// In-memory collection of tasks plus the completed archive.
///
/// Tasks are kept sorted by priority (highest first, ties in insertion
/// order). Every mutation validates before it writes, so a refused request
/// leaves the board untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    tasks: Vec<Task>,
    archive: Vec<CompletedEntry>,
    last_issued: Option<TaskId>,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a board from previously persisted tasks and archive entries.
    #[must_use]
    pub fn from_parts(mut tasks: Vec<Task>, archive: Vec<CompletedEntry>) -> Self {
        sort_by_priority(&mut tasks, Task::priority);
        let last_issued = tasks.iter().map(Task::id).max();
        Self {
            tasks,
            archive,
            last_issued,
        }
    }

    /// Inserts a new task in `todo` under a fresh time-derived identifier.
    pub fn create(&mut self, new_task: NewTask, clock: &impl Clock) -> Task {
        let id = self.issue_id(clock);
        let task = Task::create(id, new_task);
        self.tasks.push(task.clone());
        self.resort();
        task
    }

    /// Reassigns a task to another column; stamps are unaffected.
    pub fn move_to_column(&mut self, id: TaskId, target: ColumnId) -> MoveOutcome {
        let Some(index) = self.position(id) else {
            return MoveOutcome::Unchanged;
        };
        let Some(task) = self.tasks.get(index) else {
            return MoveOutcome::Unchanged;
        };
        if task.is_completed() || task.column() == &target || target == ColumnId::Completed {
            return MoveOutcome::Unchanged;
        }

        let mut moved = self.tasks.remove(index);
        moved.set_column(target);
        self.tasks.push(moved.clone());
        self.resort();
        MoveOutcome::Moved(moved)
    }

    /// Adds a stamp to a task on behalf of `role`.
    ///
    /// # Errors
    ///
    /// Returns the [`StampError`] from the workflow; the board is unchanged.
    pub fn apply_stamp(
        &mut self,
        id: TaskId,
        role: Role,
        stamp: Stamp,
    ) -> Result<StampOutcome, StampError> {
        let Some(index) = self.position(id) else {
            return Ok(StampOutcome::TaskNotFound);
        };
        let Some(task) = self.tasks.get(index) else {
            return Ok(StampOutcome::TaskNotFound);
        };
        let transition = match plan_stamp(task, role, stamp)? {
            StampPlan::AlreadyApplied => return Ok(StampOutcome::AlreadyApplied),
            StampPlan::Apply(transition) => transition,
        };

        let mut updated = self.tasks.remove(index);
        updated.add_stamp(transition.stamp);
        if transition.completes {
            updated.mark_completed();
            self.archive_entry(CompletedEntry::from(&updated));
        } else if let Some(column) = transition.move_to {
            updated.set_column(column);
        }
        self.tasks.push(updated.clone());
        self.resort();
        Ok(StampOutcome::Applied(updated))
    }

    /// Deletes every open task held by a dynamic column.
    ///
    /// Protected columns are ignored. Returns the number of removed tasks.
    pub fn remove_dynamic_column(&mut self, column: &ColumnId) -> usize {
        if column.is_protected() {
            return 0;
        }
        let before = self.tasks.len();
        self.tasks
            .retain(|task| task.is_completed() || task.column() != column);
        before - self.tasks.len()
    }

    /// Returns all tasks in priority order.
    #[must_use]
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns archive entries in completion order.
    #[must_use]
    pub fn archive(&self) -> &[CompletedEntry] {
        &self.archive
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns every completed task in priority order.
    #[must_use]
    pub fn completed_tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_completed())
            .cloned()
            .collect()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    fn resort(&mut self) {
        sort_by_priority(&mut self.tasks, Task::priority);
    }

    fn archive_entry(&mut self, entry: CompletedEntry) {
        self.archive.retain(|existing| existing.id != entry.id);
        self.archive.push(entry);
    }

    fn issue_id(&mut self, clock: &impl Clock) -> TaskId {
        let millis = u64::try_from(clock.utc().timestamp_millis()).unwrap_or_default();
        let candidate = TaskId::new(millis);
        let id = match self.last_issued {
            Some(last) if candidate <= last => last.successor(),
            _ => candidate,
        };
        self.last_issued = Some(id);
        id
    }
}
