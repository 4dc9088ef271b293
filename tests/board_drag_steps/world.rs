//! Shared world state for board drag BDD scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::InMemoryTaskStore,
    domain::{ProjectId, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
    services::{BoardLoadError, BoardSession, GestureOutcome},
};
use taskboard::config::BoardViewConfig;

/// In-memory store that can be taken offline mid-scenario.
#[derive(Debug, Default)]
pub struct SwitchableStore {
    pub inner: InMemoryTaskStore,
    offline: AtomicBool,
    fetches: AtomicUsize,
}

impl SwitchableStore {
    /// Makes every later call fail with a network error.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    /// Returns how many times tasks were fetched.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> TaskStoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(TaskStoreError::network(std::io::Error::other(
                "task store unreachable",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskStore for SwitchableStore {
    async fn fetch_tasks(&self, project_id: ProjectId) -> TaskStoreResult<Vec<Task>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        self.inner.fetch_tasks(project_id).await
    }

    async fn set_task_status(&self, task_id: TaskId, status: TaskStatus) -> TaskStoreResult<Task> {
        self.check_online()?;
        self.inner.set_task_status(task_id, status).await
    }
}

/// Session type used by the BDD world.
pub type TestSession = BoardSession<SwitchableStore, DefaultClock>;

/// Scenario world for board drag behaviour tests.
pub struct BoardDragWorld {
    pub store: Arc<SwitchableStore>,
    pub session: TestSession,
    pub last_open: Option<Result<(), BoardLoadError>>,
    pub last_outcome: Option<GestureOutcome>,
}

impl BoardDragWorld {
    /// Creates a world around an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(SwitchableStore::default());
        let session = BoardSession::new(
            Arc::clone(&store),
            Arc::new(DefaultClock),
            BoardViewConfig::default(),
        );

        Self {
            store,
            session,
            last_open: None,
            last_outcome: None,
        }
    }
}

impl Default for BoardDragWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardDragWorld {
    BoardDragWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
