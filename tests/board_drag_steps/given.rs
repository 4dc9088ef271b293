//! Given steps for board drag BDD scenarios.

use super::world::{BoardDragWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::domain::{ProjectId, Task, TaskId, TaskStatus};

#[given(r#"a project {project_id:u64} with task {task_id:u64} "{title}" in "{status}""#)]
fn project_with_task(
    world: &mut BoardDragWorld,
    project_id: u64,
    task_id: u64,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let initial = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task = Task::new(TaskId::new(task_id)?, title, initial)?;
    world
        .store
        .inner
        .seed(ProjectId::new(project_id)?, [task])
        .wrap_err("seed project for drag scenario")?;
    Ok(())
}

#[given(r#"the board for project "{raw_project_id}" is open"#)]
fn board_is_open(world: &mut BoardDragWorld, raw_project_id: String) -> Result<(), eyre::Report> {
    run_async(world.session.open(&raw_project_id)).wrap_err("open board for drag scenario")?;
    Ok(())
}

#[given("the store is unreachable")]
fn store_is_unreachable(world: &mut BoardDragWorld) {
    world.store.go_offline();
}
