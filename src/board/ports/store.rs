//! Store port for fetching a project's tasks and changing task status.

use crate::board::domain::{ProjectId, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Request/response contract with the external task persistence service.
///
/// Implementations never retry on their own; retry policy belongs to the
/// caller.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetches every task of a project, in store order.
    ///
    /// An empty vector means the project exists and has no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the project does not exist
    /// and [`TaskStoreError::Network`] on connectivity or server failure.
    async fn fetch_tasks(&self, project_id: ProjectId) -> TaskStoreResult<Vec<Task>>;

    /// Changes the status of a task and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Conflict`] when the task no longer exists,
    /// [`TaskStoreError::Validation`] when the store rejects the status or
    /// answers with a malformed record, and [`TaskStoreError::Network`]
    /// otherwise.
    async fn set_task_status(&self, task_id: TaskId, status: TaskStatus) -> TaskStoreResult<Task>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// Transient connectivity or server failure.
    #[error("network error: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),

    /// The project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// A request or response did not match the task contract.
    #[error("validation error: {0}")]
    Validation(String),

    /// The task was deleted or changed concurrently by another actor.
    #[error("task {0} was changed or removed concurrently")]
    Conflict(TaskId),
}

impl TaskStoreError {
    /// Wraps a connectivity or server error.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }

    /// Creates a validation error from any displayable cause.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns `true` for failures worth retrying.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
