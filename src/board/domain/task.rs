//! Task aggregate and completed-archive entries.

use super::{ColumnId, DueDate, Priority, Stamp, StampSet, TaskId, TaskValidationError};

/// Validated input for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    priority: Priority,
    due_date: DueDate,
    created_by: String,
}

impl NewTask {
    /// Validates raw create-task fields.
    ///
    /// Title, description and creator are trimmed; priority is normalised to
    /// lowercase.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskValidationError`] found, checking title,
    /// description, priority, due date and creator in that order.
    pub fn new(
        title: &str,
        description: &str,
        priority: &str,
        due_date: &str,
        created_by: &str,
    ) -> Result<Self, TaskValidationError> {
        Ok(Self {
            title: non_blank(title).ok_or(TaskValidationError::EmptyTitle)?,
            description: non_blank(description).ok_or(TaskValidationError::EmptyDescription)?,
            priority: Priority::parse(priority)?,
            due_date: DueDate::parse(due_date)?,
            created_by: non_blank(created_by).ok_or(TaskValidationError::EmptyCreator)?,
        })
    }

    /// Returns the validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the validated priority.
    #[must_use]
    pub const fn priority(&self) -> &Priority {
        &self.priority
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    priority: Priority,
    due_date: DueDate,
    created_by: String,
    column: ColumnId,
    stamps: StampSet,
    completed: bool,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted due date.
    pub due_date: DueDate,
    /// Name of the manager who created the task.
    pub created_by: String,
    /// Stored column.
    pub column: ColumnId,
    /// Stamps in application order.
    pub stamps: StampSet,
    /// Persisted completion flag.
    pub completed: bool,
}

impl Task {
    /// Creates a task in `todo` with no stamps.
    #[must_use]
    pub fn create(id: TaskId, new_task: NewTask) -> Self {
        Self {
            id,
            title: new_task.title,
            description: new_task.description,
            priority: new_task.priority,
            due_date: new_task.due_date,
            created_by: new_task.created_by,
            column: ColumnId::Todo,
            stamps: StampSet::new(),
            completed: false,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// The caller is responsible for having checked stamp ordering and the
    /// completion flag; see [`Task::is_consistent`].
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            due_date: data.due_date,
            created_by: data.created_by,
            column: data.column,
            stamps: data.stamps,
            completed: data.completed,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> &Priority {
        &self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DueDate {
        self.due_date
    }

    /// Returns the creating manager's name.
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Returns the stored column.
    #[must_use]
    pub const fn column(&self) -> &ColumnId {
        &self.column
    }

    /// Returns the applied stamps.
    #[must_use]
    pub const fn stamps(&self) -> &StampSet {
        &self.stamps
    }

    /// Returns `true` once the `Concluído` stamp has been applied.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns `true` when stamps are well ordered, the completion flag
    /// matches the `Concluído` stamp, and only completed tasks sit in the
    /// completed pseudo-column.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let completion_matches = self.completed == self.stamps.contains(Stamp::Completed);
        let column_matches = self.completed || self.column != ColumnId::Completed;
        self.stamps.is_well_ordered() && completion_matches && column_matches
    }

    pub(crate) fn set_column(&mut self, column: ColumnId) {
        self.column = column;
    }

    pub(crate) fn add_stamp(&mut self, stamp: Stamp) -> bool {
        self.stamps.insert(stamp)
    }

    pub(crate) fn mark_completed(&mut self) {
        self.completed = true;
        self.column = ColumnId::Completed;
    }
}

/// Reduced projection of a task kept once it is completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedEntry {
    /// Identifier of the completed task.
    pub id: TaskId,
    /// Title at completion time.
    pub title: String,
    /// Description at completion time.
    pub description: String,
    /// Due date of the task.
    pub due_date: DueDate,
}

impl From<&Task> for CompletedEntry {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            due_date: task.due_date(),
        }
    }
}
