//! Command dispatcher for the task board.
//!
//! Every command validates the caller's role and input before it touches the
//! board, mutates under a single-writer lock, and then writes the settled
//! state through to the key-value store. A failed write keeps the in-memory
//! change and is reported as a [`PersistenceWarning`].

use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::Session;
use crate::board::{
    adapters::records::{decode_archive, decode_tasks, encode_archive, encode_tasks},
    config::BoardConfig,
    domain::{
        Board, BoardView, ColumnId, CompletedEntry, GatedAction, MoveOutcome, NewTask,
        PermissionError, PreconditionError, Role, Stamp, StampError, StampOutcome, Task, TaskId,
        TaskValidationError, build_view,
    },
    ports::{KeyValueStore, KeyValueStoreError},
};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    priority: String,
    due_date: String,
}

impl CreateTaskRequest {
    /// Creates a request from raw form fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: priority.into(),
            due_date: due_date.into(),
        }
    }
}

/// Command-level failures. None of them changes board state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardCommandError {
    /// Create-task input is malformed.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// The caller's role may not perform the command.
    #[error(transparent)]
    Permission(#[from] PermissionError),
    /// A stamp was requested out of order.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

impl From<StampError> for BoardCommandError {
    fn from(err: StampError) -> Self {
        match err {
            StampError::Permission(inner) => Self::Permission(inner),
            StampError::Precondition(inner) => Self::Precondition(inner),
        }
    }
}

/// Write-through to the store failed; the in-memory change was kept.
#[derive(Debug, Clone, Error)]
pub enum PersistenceWarning {
    /// The store rejected a record.
    #[error("could not save board data: {0}")]
    Store(#[from] KeyValueStoreError),
    /// The board could not be serialised.
    #[error("could not encode board data: {0}")]
    Encode(String),
}

/// Successful command result, possibly carrying a persistence warning.
#[derive(Debug, Clone)]
pub struct CommandOutcome<T> {
    value: T,
    warning: Option<PersistenceWarning>,
}

impl<T> CommandOutcome<T> {
    const fn new(value: T, warning: Option<PersistenceWarning>) -> Self {
        Self { value, warning }
    }

    /// Returns the command result.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Returns the persistence warning, if the write-through failed.
    #[must_use]
    pub const fn warning(&self) -> Option<&PersistenceWarning> {
        self.warning.as_ref()
    }

    /// Consumes the outcome, returning the command result.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Summary of what was recovered when a board was opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Task entries dropped as invalid or duplicated.
    pub dropped_tasks: usize,
    /// Archive entries dropped as invalid or duplicated.
    pub dropped_archive_entries: usize,
    /// Records that were unreadable or not a JSON array and read as empty.
    pub unreadable_records: Vec<String>,
}

impl LoadReport {
    /// Returns `true` when everything stored was recovered.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped_tasks == 0
            && self.dropped_archive_entries == 0
            && self.unreadable_records.is_empty()
    }
}

/// Task board command dispatcher.
pub struct BoardService<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    config: BoardConfig,
    board: Mutex<Board>,
}

impl<S, C> BoardService<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Creates a service over an empty board without reading the store.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, config: BoardConfig) -> Self {
        Self::with_board(store, clock, config, Board::new())
    }

    /// Creates a service over an existing board.
    #[must_use]
    pub fn with_board(store: Arc<S>, clock: Arc<C>, config: BoardConfig, board: Board) -> Self {
        Self {
            store,
            clock,
            config,
            board: Mutex::new(board),
        }
    }

    /// Loads the board from the store.
    ///
    /// Missing, unreadable or malformed records read as empty and invalid
    /// entries are dropped, so opening never fails; the returned report
    /// says what was lost.
    pub async fn open(store: Arc<S>, clock: Arc<C>, config: BoardConfig) -> (Self, LoadReport) {
        let mut report = LoadReport::default();

        let raw_tasks = read_record(&*store, &config.keys.tasks, &mut report).await;
        let tasks = decode_tasks(raw_tasks.as_deref());
        if tasks.malformed {
            report.unreadable_records.push(config.keys.tasks.clone());
        }
        report.dropped_tasks = tasks.dropped;

        let raw_archive = read_record(&*store, &config.keys.completed, &mut report).await;
        let archive = decode_archive(raw_archive.as_deref());
        if archive.malformed {
            report.unreadable_records.push(config.keys.completed.clone());
        }
        report.dropped_archive_entries = archive.dropped;

        info!(
            tasks = tasks.items.len(),
            archived = archive.items.len(),
            dropped_tasks = report.dropped_tasks,
            dropped_archive_entries = report.dropped_archive_entries,
            "board loaded"
        );
        let board = Board::from_parts(tasks.items, archive.items);
        (Self::with_board(store, clock, config, board), report)
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Creates a task in `todo` on behalf of a manager.
    ///
    /// # Errors
    ///
    /// Returns [`BoardCommandError::Permission`] for non-managers and
    /// [`BoardCommandError::Validation`] for malformed input.
    pub async fn create_task(
        &self,
        actor: &Session,
        request: CreateTaskRequest,
    ) -> Result<CommandOutcome<Task>, BoardCommandError> {
        require_manager(actor.role, GatedAction::CreateTask)?;
        let new_task = NewTask::new(
            &request.title,
            &request.description,
            &request.priority,
            &request.due_date,
            &actor.name,
        )?;

        let mut board = self.board.lock().await;
        let task = board.create(new_task, &*self.clock);
        info!(task_id = %task.id(), priority = %task.priority(), "task created");
        let warning = self.persist(&board).await;
        Ok(CommandOutcome::new(task, warning))
    }

    /// Moves a task between columns.
    ///
    /// Column moves are not role-gated. Moving onto the same column, an
    /// unknown task, a completed task, or a move into the completed
    /// pseudo-column changes nothing.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        from: &ColumnId,
        to: ColumnId,
    ) -> CommandOutcome<MoveOutcome> {
        if from == &to {
            return CommandOutcome::new(MoveOutcome::Unchanged, None);
        }

        let mut board = self.board.lock().await;
        match board.move_to_column(task_id, to) {
            MoveOutcome::Moved(task) => {
                info!(%task_id, column = %task.column(), "task moved");
                let warning = self.persist(&board).await;
                CommandOutcome::new(MoveOutcome::Moved(task), warning)
            }
            MoveOutcome::Unchanged => {
                debug!(%task_id, "move ignored");
                CommandOutcome::new(MoveOutcome::Unchanged, None)
            }
        }
    }

    /// Applies a stamp to a task.
    ///
    /// Repeating a stamp that is already present, or stamping an unknown
    /// task, changes nothing and is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BoardCommandError::Permission`] when the role may not
    /// request the stamp and [`BoardCommandError::Precondition`] when
    /// earlier stamps are missing.
    pub async fn apply_stamp(
        &self,
        role: Role,
        task_id: TaskId,
        stamp: Stamp,
    ) -> Result<CommandOutcome<StampOutcome>, BoardCommandError> {
        let mut board = self.board.lock().await;
        let outcome = board.apply_stamp(task_id, role, stamp).inspect_err(|err| {
            debug!(%task_id, %stamp, %role, error = %err, "stamp refused");
        })?;
        match outcome {
            StampOutcome::Applied(task) => {
                info!(
                    %task_id,
                    %stamp,
                    column = %task.column(),
                    completed = task.is_completed(),
                    "stamp applied"
                );
                let warning = self.persist(&board).await;
                Ok(CommandOutcome::new(StampOutcome::Applied(task), warning))
            }
            unchanged => {
                debug!(%task_id, %stamp, "stamp request changed nothing");
                Ok(CommandOutcome::new(unchanged, None))
            }
        }
    }

    /// Removes a dynamic column and discards its open tasks.
    ///
    /// Protected columns are left alone. Returns the number of discarded
    /// tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardCommandError::Permission`] for non-managers.
    pub async fn remove_column(
        &self,
        role: Role,
        column: &ColumnId,
    ) -> Result<CommandOutcome<usize>, BoardCommandError> {
        require_manager(role, GatedAction::RemoveColumn)?;
        if column.is_protected() {
            debug!(%column, "protected column cannot be removed");
            return Ok(CommandOutcome::new(0, None));
        }

        let mut board = self.board.lock().await;
        let removed = board.remove_dynamic_column(column);
        if removed == 0 {
            return Ok(CommandOutcome::new(0, None));
        }
        info!(%column, removed, "dynamic column removed");
        let warning = self.persist(&board).await;
        Ok(CommandOutcome::new(removed, warning))
    }

    /// Builds the column view for `role`.
    pub async fn list_columns_view(&self, role: Role) -> BoardView {
        let board = self.board.lock().await;
        build_view(board.snapshot(), role, self.config.completed_display_limit)
    }

    /// Returns every completed task in priority order.
    pub async fn list_all_completed(&self) -> Vec<Task> {
        self.board.lock().await.completed_tasks()
    }

    /// Returns the completed archive in completion order.
    pub async fn completed_archive(&self) -> Vec<CompletedEntry> {
        self.board.lock().await.archive().to_vec()
    }

    /// Returns all tasks in priority order.
    pub async fn snapshot(&self) -> Vec<Task> {
        self.board.lock().await.snapshot().to_vec()
    }

    async fn persist(&self, board: &Board) -> Option<PersistenceWarning> {
        let warning = self.write_through(board).await.err()?;
        warn!(error = %warning, "board change kept in memory only");
        Some(warning)
    }

    async fn write_through(&self, board: &Board) -> Result<(), PersistenceWarning> {
        let tasks = encode_tasks(board.snapshot())
            .map_err(|err| PersistenceWarning::Encode(err.to_string()))?;
        let archive = encode_archive(board.archive())
            .map_err(|err| PersistenceWarning::Encode(err.to_string()))?;
        self.store.put(&self.config.keys.tasks, &tasks).await?;
        self.store.put(&self.config.keys.completed, &archive).await?;
        Ok(())
    }
}

const fn require_manager(role: Role, action: GatedAction) -> Result<(), PermissionError> {
    if role.is_manager() {
        Ok(())
    } else {
        Err(PermissionError::new(action))
    }
}

async fn read_record<S>(store: &S, key: &str, report: &mut LoadReport) -> Option<String>
where
    S: KeyValueStore + ?Sized,
{
    match store.get(key).await {
        Ok(raw) => raw,
        Err(err) => {
            warn!(key, error = %err, "could not read record; reading as empty");
            report.unreadable_records.push(key.to_owned());
            None
        }
    }
}
