//! Then steps for board drag BDD scenarios.

use super::world::BoardDragWorld;
use rstest_bdd_macros::then;
use taskboard::board::{
    domain::{TaskId, TaskStatus},
    ports::TaskStoreError,
    services::{BoardLoadError, BoardPhase},
};

fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

#[then(r#"column "{status}" holds {count:u64} tasks"#)]
fn column_holds(world: &BoardDragWorld, status: String, count: u64) -> Result<(), eyre::Report> {
    let column = world
        .session
        .column_for(parse_status(&status)?)
        .ok_or_else(|| eyre::eyre!("board is not loaded"))?;
    let expected = usize::try_from(count)?;

    if column.len() != expected {
        return Err(eyre::eyre!(
            "expected {expected} tasks in '{status}', found {}",
            column.len()
        ));
    }
    Ok(())
}

#[then(r#"the store records task {task_id:u64} in "{status}""#)]
fn store_records_status(
    world: &BoardDragWorld,
    task_id: u64,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let stored = world
        .store
        .inner
        .task(TaskId::new(task_id)?)?
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from store"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected stored status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("no failure notification is recorded")]
fn no_notification(world: &BoardDragWorld) -> Result<(), eyre::Report> {
    let notifications = world.session.notifications();
    if !notifications.is_empty() {
        return Err(eyre::eyre!("unexpected notifications: {notifications:?}"));
    }
    Ok(())
}

#[then("a failure notification is recorded")]
fn notification_recorded(world: &BoardDragWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing drag outcome"))?;
    if outcome.is_committed() {
        return Err(eyre::eyre!("expected a rollback, got {outcome:?}"));
    }
    if world.session.notifications().len() != 1 {
        return Err(eyre::eyre!(
            "expected one notification, found {}",
            world.session.notifications().len()
        ));
    }
    Ok(())
}

#[then("the board shows its error state")]
fn board_shows_error(world: &BoardDragWorld) -> Result<(), eyre::Report> {
    if !matches!(world.session.phase(), BoardPhase::Failed(_)) {
        return Err(eyre::eyre!(
            "expected failed phase, got {:?}",
            world.session.phase()
        ));
    }
    if world.session.board().is_some() || world.session.snapshot().is_some() {
        return Err(eyre::eyre!("a failed board must not expose a partition"));
    }
    Ok(())
}

#[then("the load failed because the project was not found")]
fn load_not_found(world: &BoardDragWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_open
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing open result"))?;
    if !matches!(result, Err(BoardLoadError::Store(TaskStoreError::NotFound(_)))) {
        return Err(eyre::eyre!("expected NotFound, got {result:?}"));
    }
    Ok(())
}

#[then("the store was never asked for tasks")]
fn store_never_fetched(world: &BoardDragWorld) -> Result<(), eyre::Report> {
    let fetches = world.store.fetch_count();
    if fetches != 0 {
        return Err(eyre::eyre!("expected no fetches, found {fetches}"));
    }
    Ok(())
}
