//! Given steps for stamp workflow BDD scenarios.

use super::world::{StampWorkflowWorld, run_async};
use corpflow::board::{
    domain::{Role, Stamp},
    services::{CreateTaskRequest, Session},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a manager created a task titled "{title}" with priority "{priority}""#)]
fn manager_created_task(
    world: &mut StampWorkflowWorld,
    title: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let manager = Session::new("Ana Gerente", "ana", Role::Manager);
    let description = format!("{title} details");
    let outcome = run_async(world.service.create_task(
        &manager,
        CreateTaskRequest::new(title, description, priority, "15052025"),
    ))
    .wrap_err("create task for stamp scenario")?;
    world.task_id = Some(outcome.value().id());
    Ok(())
}

#[given(r#"the task was already stamped "{stamp}" by the "{role}""#)]
fn task_already_stamped(
    world: &mut StampWorkflowWorld,
    stamp: String,
    role: String,
) -> Result<(), eyre::Report> {
    let role = Role::try_from(role.as_str())
        .map_err(|err| eyre::eyre!("invalid role in scenario: {err}"))?;
    let stamp = Stamp::try_from(stamp.as_str())
        .map_err(|err| eyre::eyre!("invalid stamp in scenario: {err}"))?;
    let task_id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    run_async(world.service.apply_stamp(role, task_id, stamp))
        .wrap_err("apply stamp in scenario setup")?;
    Ok(())
}
