//! End-to-end board flows against the in-memory task store.
//!
//! These tests drive a [`BoardSession`] through load, drag and reload the
//! way a mounted board view would, including a concurrent delete by another
//! user and a store wrapped in the retry decorator.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::sync::Arc;
use std::time::Duration;

use mockable::DefaultClock;
use taskboard::board::{
    adapters::{InMemoryTaskStore, RetryingTaskStore},
    domain::{ProjectId, Task, TaskId, TaskPriority, TaskStatus},
    ports::TaskStoreError,
    services::{BoardSession, Severity},
    view::ColumnView,
};
use taskboard::config::{BoardViewConfig, RetryPolicy};

fn project() -> ProjectId {
    ProjectId::new(1).expect("positive project id")
}

fn task_id(value: u64) -> TaskId {
    TaskId::new(value).expect("positive task id")
}

fn seeded_store() -> InMemoryTaskStore {
    let store = InMemoryTaskStore::new();
    store
        .seed(
            project(),
            [
                Task::new(task_id(1), "Draft roadmap", TaskStatus::ToDo)
                    .expect("valid task")
                    .with_priority(TaskPriority::High),
                Task::new(task_id(2), "Fix login bug", TaskStatus::WorkInProgress)
                    .expect("valid task"),
                Task::new(task_id(3), "Review API docs", TaskStatus::ToDo).expect("valid task"),
            ],
        )
        .expect("seed project");
    store
}

fn card_ids(column: &ColumnView) -> Vec<u64> {
    column.cards.iter().map(|card| card.id.value()).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn drag_survives_reload_and_matches_store() {
    let store = Arc::new(seeded_store());
    let mut session = BoardSession::new(
        Arc::clone(&store),
        Arc::new(DefaultClock),
        BoardViewConfig::default(),
    );
    session.open("1").await.expect("board opens");

    session.pick_up(task_id(3)).expect("pick up");
    let outcome = session
        .drop_on(Some(TaskStatus::UnderReview))
        .await
        .expect("drop resolves");
    assert!(outcome.is_committed());

    session.reload().await.expect("board reloads");
    let snapshot = session.snapshot().expect("ready board");
    let [todo, in_progress, review, done] = snapshot.columns.as_slice() else {
        panic!("expected four columns");
    };
    assert_eq!(card_ids(todo), vec![1]);
    assert_eq!(card_ids(in_progress), vec![2]);
    assert_eq!(card_ids(review), vec![3]);
    assert!(done.is_empty());
    assert_eq!(
        store.task(task_id(3)).expect("readable store").map(|task| task.status()),
        Some(TaskStatus::UnderReview)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_delete_rolls_back_with_conflict() {
    let store = Arc::new(seeded_store());
    let mut session = BoardSession::new(
        Arc::clone(&store),
        Arc::new(DefaultClock),
        BoardViewConfig::default(),
    );
    session.open("1").await.expect("board opens");
    let before = session.board().cloned();

    session.pick_up(task_id(1)).expect("pick up");
    store.remove_task(task_id(1)).expect("delete from store");
    let outcome = session
        .drop_on(Some(TaskStatus::Completed))
        .await
        .expect("drop resolves");

    assert!(matches!(
        outcome.store_error(),
        Some(TaskStoreError::Conflict(id)) if *id == task_id(1)
    ));
    assert_eq!(session.board().cloned(), before);
    let notice = session.notifications().first().expect("conflict notice");
    assert_eq!(notice.severity(), Severity::Warning);

    session.reload().await.expect("board reloads");
    assert!(session
        .board()
        .expect("ready board")
        .task(task_id(1))
        .is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn retrying_store_behaves_like_plain_store() {
    let store = RetryingTaskStore::new(
        seeded_store(),
        RetryPolicy::new(2, Duration::from_millis(1)),
    );
    let mut session = BoardSession::new(
        Arc::new(store),
        Arc::new(DefaultClock),
        BoardViewConfig::default(),
    );

    let missing = session.open("404").await;
    assert!(missing.is_err());
    assert!(session.board().is_none());

    session.open("1").await.expect("board opens");
    session.pick_up(task_id(2)).expect("pick up");
    let outcome = session
        .drop_on(Some(TaskStatus::Completed))
        .await
        .expect("drop resolves");
    assert!(outcome.is_committed());
    assert_eq!(
        session
            .column_for(TaskStatus::Completed)
            .expect("ready board")
            .len(),
        1
    );
}
