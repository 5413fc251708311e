//! Shared helpers for in-memory board integration tests.

use std::sync::Arc;

use corpflow::board::{
    adapters::memory::InMemoryKeyValueStore,
    config::BoardConfig,
    domain::{ColumnId, Role, Task},
    services::{BoardService, CreateTaskRequest, Session},
};
use mockable::DefaultClock;

/// Service type used across in-memory tests.
pub type TestService = BoardService<InMemoryKeyValueStore, DefaultClock>;

/// Creates a service over an empty in-memory store.
pub fn new_service() -> (Arc<InMemoryKeyValueStore>, TestService) {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let service = BoardService::new(
        Arc::clone(&store),
        Arc::new(DefaultClock),
        BoardConfig::default(),
    );
    (store, service)
}

/// Returns a manager session.
pub fn manager() -> Session {
    Session::new("Ana Gerente", "ana", Role::Manager)
}

/// Creates a task as the manager.
///
/// # Errors
///
/// Returns an error when the service rejects the request.
pub async fn create(
    service: &TestService,
    title: &str,
    priority: &str,
) -> Result<Task, eyre::Report> {
    let outcome = service
        .create_task(
            &manager(),
            CreateTaskRequest::new(title, format!("{title} details"), priority, "15052025"),
        )
        .await?;
    eyre::ensure!(outcome.warning().is_none(), "unexpected persistence warning");
    Ok(outcome.into_value())
}

/// Parses a column identifier the way stored records are read.
///
/// # Errors
///
/// Returns an error when the identifier is blank.
pub fn column(name: &str) -> Result<ColumnId, eyre::Report> {
    ColumnId::parse(name).map_err(|err| eyre::eyre!("invalid column '{name}': {err}"))
}
