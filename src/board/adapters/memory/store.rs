//! In-memory task store for tests and local demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::board::{
    domain::{ProjectId, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store keyed by project.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    projects: HashMap<ProjectId, Vec<Task>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store with no projects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces a project with the given tasks, in order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Network`] when the store lock is poisoned.
    pub fn seed(
        &self,
        project_id: ProjectId,
        tasks: impl IntoIterator<Item = Task>,
    ) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.projects.insert(project_id, tasks.into_iter().collect());
        Ok(())
    }

    /// Deletes a task from whichever project holds it, as another user
    /// would.
    ///
    /// Returns the removed task, if it existed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Network`] when the store lock is poisoned.
    pub fn remove_task(&self, task_id: TaskId) -> TaskStoreResult<Option<Task>> {
        let mut state = self.state.write().map_err(poisoned)?;
        for tasks in state.projects.values_mut() {
            if let Some(position) = tasks.iter().position(|task| task.id() == task_id) {
                return Ok(Some(tasks.remove(position)));
            }
        }
        Ok(None)
    }

    /// Returns the stored version of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Network`] when the store lock is poisoned.
    pub fn task(&self, task_id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .projects
            .values()
            .flatten()
            .find(|task| task.id() == task_id)
            .cloned())
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> TaskStoreError {
    TaskStoreError::network(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn fetch_tasks(&self, project_id: ProjectId) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let tasks = state
            .projects
            .get(&project_id)
            .cloned()
            .ok_or(TaskStoreError::NotFound(project_id))?;
        debug!(%project_id, count = tasks.len(), "fetched tasks from memory");
        Ok(tasks)
    }

    async fn set_task_status(&self, task_id: TaskId, status: TaskStatus) -> TaskStoreResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        let task = state
            .projects
            .values_mut()
            .flatten()
            .find(|task| task.id() == task_id)
            .ok_or(TaskStoreError::Conflict(task_id))?;
        task.set_status(status);
        debug!(%task_id, %status, "updated task status in memory");
        Ok(task.clone())
    }
}
