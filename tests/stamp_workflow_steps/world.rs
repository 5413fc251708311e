//! Shared world state for stamp workflow BDD scenarios.

use std::sync::Arc;

use corpflow::board::{
    adapters::memory::InMemoryKeyValueStore,
    config::BoardConfig,
    domain::{StampOutcome, Task, TaskId},
    services::{BoardCommandError, BoardService, CommandOutcome},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestBoardService = BoardService<InMemoryKeyValueStore, DefaultClock>;

/// Scenario world for stamp workflow behaviour tests.
pub struct StampWorkflowWorld {
    pub service: TestBoardService,
    pub task_id: Option<TaskId>,
    pub last_stamp_result: Option<Result<CommandOutcome<StampOutcome>, BoardCommandError>>,
}

impl StampWorkflowWorld {
    /// Creates a world over an empty board.
    #[must_use]
    pub fn new() -> Self {
        let service = BoardService::new(
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(DefaultClock),
            BoardConfig::default(),
        );

        Self {
            service,
            task_id: None,
            last_stamp_result: None,
        }
    }

    /// Returns the scenario task's current state.
    pub fn task(&self) -> Result<Task, eyre::Report> {
        let task_id = self
            .task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
        run_async(self.service.snapshot())
            .into_iter()
            .find(|task| task.id() == task_id)
            .ok_or_else(|| eyre::eyre!("task {task_id} is no longer on the board"))
    }
}

impl Default for StampWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> StampWorkflowWorld {
    StampWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
