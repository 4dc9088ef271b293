//! Caller-level retry decorator for any task store.

use async_trait::async_trait;
use std::future::Future;
use tokio::time::sleep;
use tracing::warn;

use crate::board::{
    domain::{ProjectId, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreResult},
};
use crate::config::RetryPolicy;

const BACKOFF_MULTIPLIER: u32 = 2;

/// Task store wrapper that retries transient failures with exponential
/// backoff.
///
/// Only [`TaskStoreError::Network`](crate::board::ports::TaskStoreError::Network)
/// is retried. Missing projects, conflicts and validation failures are
/// returned on the first attempt.
#[derive(Debug, Clone)]
pub struct RetryingTaskStore<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S> RetryingTaskStore<S>
where
    S: TaskStore,
{
    /// Wraps a store with the given retry policy.
    #[must_use]
    pub const fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Returns the wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    async fn with_retries<T, F, Fut>(&self, operation: &'static str, call: F) -> TaskStoreResult<T>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = TaskStoreResult<T>> + Send,
        T: Send,
    {
        let mut delay = self.policy.base_delay;
        let mut attempt = 0;
        loop {
            match call().await {
                Err(err) if err.is_transient() && attempt < self.policy.max_retries => {
                    attempt += 1;
                    warn!(operation, attempt, ?delay, %err, "retrying task store call");
                    sleep(delay).await;
                    delay = delay.saturating_mul(BACKOFF_MULTIPLIER);
                }
                result => return result,
            }
        }
    }
}

#[async_trait]
impl<S> TaskStore for RetryingTaskStore<S>
where
    S: TaskStore,
{
    async fn fetch_tasks(&self, project_id: ProjectId) -> TaskStoreResult<Vec<Task>> {
        self.with_retries("fetch_tasks", move || self.inner.fetch_tasks(project_id))
            .await
    }

    async fn set_task_status(&self, task_id: TaskId, status: TaskStatus) -> TaskStoreResult<Task> {
        self.with_retries("set_task_status", move || {
            self.inner.set_task_status(task_id, status)
        })
        .await
    }
}
