//! In-memory integration tests for reopening a board from stored records.

use std::sync::Arc;

use super::helpers::{column, create, new_service};
use corpflow::board::{
    adapters::memory::InMemoryKeyValueStore,
    config::BoardConfig,
    domain::{ColumnId, Role, Stamp},
    services::BoardService,
};
use eyre::{ensure, eyre};
use mockable::DefaultClock;

#[tokio::test(flavor = "multi_thread")]
async fn reopened_board_matches_saved_state() -> Result<(), eyre::Report> {
    let (store, service) = new_service();
    let done = create(&service, "Done", "baixa").await?;
    for stamp in Stamp::ALL {
        service.apply_stamp(Role::Manager, done.id(), stamp).await?;
    }
    let moved = create(&service, "Moved", "alta").await?;
    service
        .move_task(moved.id(), &ColumnId::Todo, column("qa")?)
        .await;

    let (reopened, report) =
        BoardService::open(store, Arc::new(DefaultClock), BoardConfig::default()).await;

    ensure!(report.is_clean(), "unexpected load report {report:?}");
    ensure!(reopened.snapshot().await == service.snapshot().await);
    ensure!(reopened.completed_archive().await == service.completed_archive().await);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn reopening_drops_invalid_entries_and_keeps_the_rest() -> Result<(), eyre::Report> {
    let tasks = r#"[
        {"id": 1, "title": "ok", "description": "d", "priority": "alta",
         "dueDate": "15/05/2025", "createdBy": "Ana", "columnId": "todo",
         "blocks": [], "completed": false},
        {"id": "x", "title": "bad id"},
        {"id": 2, "title": "skipped approval", "description": "d", "priority": "baixa",
         "dueDate": "15/05/2025", "createdBy": "Ana", "columnId": "inProgress",
         "blocks": ["Aprovado"], "completed": false}
    ]"#;
    let store = Arc::new(InMemoryKeyValueStore::with_records([
        ("sharedTasks", tasks),
        ("completedTasks", "{ not json"),
    ]));

    let (service, report) =
        BoardService::open(store, Arc::new(DefaultClock), BoardConfig::default()).await;

    ensure!(report.dropped_tasks == 2);
    ensure!(report.unreadable_records == ["completedTasks"]);
    let snapshot = service.snapshot().await;
    ensure!(snapshot.len() == 1);
    ensure!(service.completed_archive().await.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn new_ids_follow_loaded_ids() -> Result<(), eyre::Report> {
    let far_future = u64::MAX - 10;
    let tasks = format!(
        r#"[{{"id": {far_future}, "title": "t", "description": "d", "priority": "alta",
             "dueDate": "15/05/2025", "createdBy": "Ana", "columnId": "todo",
             "blocks": [], "completed": false}}]"#
    );
    let store = Arc::new(InMemoryKeyValueStore::with_records([("sharedTasks", tasks)]));
    let (service, _) =
        BoardService::open(store, Arc::new(DefaultClock), BoardConfig::default()).await;

    let created = create(&service, "Next", "alta").await?;

    ensure!(created.id().value() == far_future + 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn look_alike_column_names_never_lose_tasks_on_reload() -> Result<(), eyre::Report> {
    let (store, service) = new_service();
    let task = create(&service, "Report", "alta").await?;

    for name in [" completed ", "todo ", "\tinProgress"] {
        let target = column(name)?;
        ensure!(target.is_protected(), "'{name}' must name a fixed column");
        service.move_task(task.id(), &ColumnId::Todo, target).await;
    }
    ensure!(ColumnId::parse("   ").is_err());
    let padded = column("  qa ")?;
    ensure!(padded.as_str() == "qa");
    service.move_task(task.id(), &ColumnId::InProgress, padded.clone()).await;

    let view = service.list_columns_view(Role::Manager).await;
    let ids = view.column_ids();
    ensure!(ids.len() == 5, "unexpected columns {ids:?}");
    let (reopened, report) =
        BoardService::open(store, Arc::new(DefaultClock), BoardConfig::default()).await;

    ensure!(report.is_clean(), "unexpected load report {report:?}");
    let tasks = reopened.snapshot().await;
    let reloaded = tasks.first().ok_or_else(|| eyre!("task lost on reload"))?;
    ensure!(reloaded.column() == &padded);
    ensure!(!reloaded.is_completed());
    Ok(())
}
