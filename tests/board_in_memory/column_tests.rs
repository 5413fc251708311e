//! In-memory integration tests for column moves, removal and views.

use super::helpers::{column, create, new_service};
use corpflow::board::domain::{ColumnId, MoveOutcome, Role, Stamp};
use eyre::{ensure, eyre};

#[tokio::test(flavor = "multi_thread")]
async fn removing_dynamic_column_discards_its_two_tasks() -> Result<(), eyre::Report> {
    let (_, service) = new_service();
    let qa = column("qa")?;
    let kept = create(&service, "Kept", "média").await?;
    for title in ["First", "Second"] {
        let task = create(&service, title, "alta").await?;
        let outcome = service.move_task(task.id(), &ColumnId::Todo, qa.clone()).await;
        ensure!(matches!(outcome.value(), MoveOutcome::Moved(_)));
    }
    ensure!(service.list_columns_view(Role::Manager).await.column(&qa).is_some());

    let removed = service.remove_column(Role::Manager, &qa).await?.into_value();

    ensure!(removed == 2);
    let remaining = service.snapshot().await;
    ensure!(remaining.len() == 1);
    ensure!(remaining.first().map(|task| task.id()) == Some(kept.id()));
    ensure!(service.list_columns_view(Role::Manager).await.column(&qa).is_none());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn fixed_columns_reject_removal_as_no_op() -> Result<(), eyre::Report> {
    let (_, service) = new_service();
    create(&service, "Report", "alta").await?;

    for column in ColumnId::FIXED {
        let removed = service.remove_column(Role::Manager, &column).await?.into_value();
        ensure!(removed == 0, "{column} must not be removable");
    }
    ensure!(service.snapshot().await.len() == 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn view_orders_columns_and_tasks() -> Result<(), eyre::Report> {
    let (_, service) = new_service();
    create(&service, "Low", "baixa").await?;
    let high = create(&service, "High", "alta").await?;
    create(&service, "Medium", "média").await?;
    let custom = create(&service, "Custom", "baixa").await?;
    service
        .move_task(custom.id(), &ColumnId::Todo, column("backlog")?)
        .await;
    service.apply_stamp(Role::Employee, high.id(), Stamp::Verified).await?;

    let view = service.list_columns_view(Role::Employee).await;

    let ids: Vec<&str> = view.columns.iter().map(|column| column.id.as_str()).collect();
    ensure!(ids == ["todo", "waitingApproval", "inProgress", "completed", "backlog"]);
    let todo = view
        .column(&ColumnId::Todo)
        .ok_or_else(|| eyre!("todo column is always present"))?;
    let titles: Vec<&str> = todo.tasks.iter().map(|task| task.title()).collect();
    ensure!(titles == ["Medium", "Low"], "unexpected todo order {titles:?}");
    let waiting = view
        .column(&ColumnId::WaitingApproval)
        .ok_or_else(|| eyre!("waiting column is always present"))?;
    ensure!(waiting.tasks.iter().map(|task| task.id()).eq([high.id()]));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn completed_column_is_limited_but_full_list_is_available() -> Result<(), eyre::Report> {
    let (_, service) = new_service();
    for n in 0..7 {
        let task = create(&service, &format!("Task {n}"), "média").await?;
        for stamp in Stamp::ALL {
            service.apply_stamp(Role::Manager, task.id(), stamp).await?;
        }
    }

    let view = service.list_columns_view(Role::Manager).await;

    let completed = view
        .column(&ColumnId::Completed)
        .ok_or_else(|| eyre!("completed column is always present"))?;
    let limit = service.config().completed_display_limit;
    ensure!(completed.tasks.len() == limit);
    ensure!(completed.total == 7);
    ensure!(service.list_all_completed().await.len() == 7);
    ensure!(service.completed_archive().await.len() == 7);
    Ok(())
}
