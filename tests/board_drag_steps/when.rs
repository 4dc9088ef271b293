//! When steps for board drag BDD scenarios.

use super::world::{BoardDragWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::board::domain::{TaskId, TaskStatus};

#[when(r#"task {task_id:u64} is dragged to "{status}""#)]
fn drag_task(world: &mut BoardDragWorld, task_id: u64, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;

    world.session.pick_up(TaskId::new(task_id)?)?;
    world.session.hover(Some(target))?;
    let outcome =
        run_async(world.session.drop_on(Some(target))).wrap_err("drop task in scenario")?;
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"the board for project "{raw_project_id}" is opened"#)]
fn board_is_opened(world: &mut BoardDragWorld, raw_project_id: String) {
    let result = run_async(world.session.open(&raw_project_id));
    world.last_open = Some(result);
}
