//! Then steps for stamp workflow BDD scenarios.

use super::world::{StampWorkflowWorld, run_async};
use corpflow::board::domain::ColumnId;
use rstest_bdd_macros::then;

#[then(r#"the task is in column "{column}""#)]
fn task_is_in_column(world: &StampWorkflowWorld, column: String) -> Result<(), eyre::Report> {
    let expected = ColumnId::parse(&column)
        .map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))?;
    let task = world.task()?;

    if task.column() != &expected {
        return Err(eyre::eyre!(
            "expected column {expected}, found {}",
            task.column()
        ));
    }

    Ok(())
}

#[then("the task is completed")]
fn task_is_completed(world: &StampWorkflowWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    if !task.is_completed() || task.column() != &ColumnId::Completed {
        return Err(eyre::eyre!("expected a completed task, got {task:?}"));
    }
    Ok(())
}

#[then("the task is not completed")]
fn task_is_not_completed(world: &StampWorkflowWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    if task.is_completed() {
        return Err(eyre::eyre!("task completed unexpectedly"));
    }
    Ok(())
}

#[then("the completed archive holds {count:usize} entry")]
fn archive_holds(world: &StampWorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    let archive = run_async(world.service.completed_archive());
    if archive.len() != count {
        return Err(eyre::eyre!(
            "expected {count} archive entries, found {}",
            archive.len()
        ));
    }
    Ok(())
}

#[then(r#"the stamp is refused with "{message}""#)]
fn stamp_is_refused(world: &StampWorkflowWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_stamp_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing stamp result"))?;

    match result {
        Err(err) if err.to_string() == message => Ok(()),
        Err(err) => Err(eyre::eyre!("expected refusal '{message}', got '{err}'")),
        Ok(outcome) => Err(eyre::eyre!(
            "expected refusal, stamp succeeded: {:?}",
            outcome.value()
        )),
    }
}
