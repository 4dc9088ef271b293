//! Tests for the retrying store decorator.

use super::support::{task, task_id};
use crate::board::{
    adapters::RetryingTaskStore,
    domain::{ProjectId, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use crate::config::RetryPolicy;
use async_trait::async_trait;
use eyre::ensure;
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Store that fails with a fixed error a set number of times before
/// succeeding.
struct FlakyStore {
    failures: usize,
    error: TaskStoreError,
    calls: AtomicUsize,
}

impl FlakyStore {
    fn new(failures: usize, error: TaskStoreError) -> Self {
        Self {
            failures,
            error,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn attempt<T>(&self, success: T) -> TaskStoreResult<T> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(self.error.clone())
        } else {
            Ok(success)
        }
    }
}

#[async_trait]
impl TaskStore for FlakyStore {
    async fn fetch_tasks(&self, _project_id: ProjectId) -> TaskStoreResult<Vec<Task>> {
        self.attempt(vec![task(1, TaskStatus::ToDo)])
    }

    async fn set_task_status(&self, task_id: TaskId, status: TaskStatus) -> TaskStoreResult<Task> {
        self.attempt(task(task_id.value(), status))
    }
}

fn offline() -> TaskStoreError {
    TaskStoreError::network(std::io::Error::other("connection reset"))
}

fn quick_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::from_millis(1))
}

#[tokio::test(flavor = "multi_thread")]
async fn network_failures_are_retried_until_success() -> eyre::Result<()> {
    let store = RetryingTaskStore::new(FlakyStore::new(2, offline()), quick_policy(3));

    let tasks = store.fetch_tasks(ProjectId::new(1)?).await?;

    ensure!(tasks.len() == 1);
    ensure!(store.inner().calls() == 3);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn gives_up_after_max_retries() -> eyre::Result<()> {
    let store = RetryingTaskStore::new(FlakyStore::new(10, offline()), quick_policy(2));

    let result = store
        .set_task_status(task_id(1), TaskStatus::Completed)
        .await;

    ensure!(matches!(result, Err(TaskStoreError::Network(_))));
    ensure!(store.inner().calls() == 3);
    Ok(())
}

#[rstest]
#[case::not_found(TaskStoreError::NotFound(ProjectId::new(1).expect("positive project id")))]
#[case::conflict(TaskStoreError::Conflict(task_id(1)))]
#[case::validation(TaskStoreError::validation("bad status"))]
#[tokio::test(flavor = "multi_thread")]
async fn non_transient_errors_fail_fast(#[case] error: TaskStoreError) -> eyre::Result<()> {
    let store = RetryingTaskStore::new(FlakyStore::new(1, error), quick_policy(5));

    let result = store
        .set_task_status(task_id(1), TaskStatus::Completed)
        .await;

    ensure!(result.is_err());
    ensure!(store.inner().calls() == 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn disabled_policy_makes_one_attempt() -> eyre::Result<()> {
    let store = RetryingTaskStore::new(FlakyStore::new(1, offline()), RetryPolicy::none());

    let result = store.fetch_tasks(ProjectId::new(1)?).await;

    ensure!(result.is_err());
    ensure!(store.inner().calls() == 1);
    Ok(())
}
