//! Board session owned by the project view.

use crate::board::{
    domain::{BoardDomainError, BoardState, GestureId, ProjectId, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
    view::{ColumnView, DragFeedback, render_columns},
};
use crate::config::BoardViewConfig;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use super::{
    DragController, DragError, GestureOutcome, GesturePhase, Notification, Release, RollbackReason,
};

/// Reasons a board could not be populated.
#[derive(Debug, Clone, Error)]
pub enum BoardLoadError {
    /// The project identifier was rejected before any fetch.
    #[error(transparent)]
    InvalidProjectId(BoardDomainError),
    /// The store could not provide the tasks.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// `reload` was called before any project was opened.
    #[error("no project has been opened")]
    NotOpened,
}

/// Load phase of the board.
#[derive(Debug, Clone, Default)]
pub enum BoardPhase {
    /// No project has been opened.
    #[default]
    Unloaded,
    /// The partition is available.
    Ready,
    /// Loading failed; no partition is exposed and a retry is possible.
    Failed(BoardLoadError),
}

/// Everything the presentation layer needs to draw the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Project on display.
    pub project_id: ProjectId,
    /// View flags passed at construction.
    pub config: BoardViewConfig,
    /// Columns in display order.
    pub columns: Vec<ColumnView>,
    /// Whether a drop is awaiting the store, which disables pick-up.
    pub pick_up_disabled: bool,
}

/// State container for one mounted board view.
///
/// The session exclusively owns the board partition and the drag
/// controller. Dropping it mid-flight simply discards the late store
/// response; the write itself still lands in the store.
pub struct BoardSession<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    config: BoardViewConfig,
    project_id: Option<ProjectId>,
    board: BoardState,
    phase: BoardPhase,
    controller: DragController,
    notifications: Vec<Notification>,
}

impl<S, C> BoardSession<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates an unloaded session.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, config: BoardViewConfig) -> Self {
        Self {
            store,
            clock,
            config,
            project_id: None,
            board: BoardState::new(),
            phase: BoardPhase::Unloaded,
            controller: DragController::new(),
            notifications: Vec::new(),
        }
    }

    /// Validates a raw project identifier and loads its tasks.
    ///
    /// The identifier is checked before the store is contacted, so an
    /// invalid route never costs a request.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLoadError::InvalidProjectId`] for a malformed
    /// identifier and [`BoardLoadError::Store`] when the fetch fails. The
    /// session phase reflects the same error.
    #[instrument(skip(self))]
    pub async fn open(&mut self, raw_project_id: &str) -> Result<(), BoardLoadError> {
        match ProjectId::parse(raw_project_id) {
            Ok(project_id) => {
                self.project_id = Some(project_id);
                self.load(project_id).await
            }
            Err(err) => {
                warn!(%err, "rejected project identifier");
                self.project_id = None;
                self.controller.abandon();
                self.board = BoardState::new();
                let failure = BoardLoadError::InvalidProjectId(err);
                self.phase = BoardPhase::Failed(failure.clone());
                Err(failure)
            }
        }
    }

    /// Fetches the open project again and rebuilds the partition.
    ///
    /// Any gesture in progress is abandoned first, so a response that
    /// arrives for it afterwards is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLoadError::NotOpened`] when no valid project is open
    /// and [`BoardLoadError::Store`] when the fetch fails.
    pub async fn reload(&mut self) -> Result<(), BoardLoadError> {
        let project_id = self.project_id.ok_or(BoardLoadError::NotOpened)?;
        self.load(project_id).await
    }

    async fn load(&mut self, project_id: ProjectId) -> Result<(), BoardLoadError> {
        self.controller.abandon();
        match self.store.fetch_tasks(project_id).await {
            Ok(tasks) => {
                info!(%project_id, count = tasks.len(), "board loaded");
                self.board.load(tasks);
                self.phase = BoardPhase::Ready;
                Ok(())
            }
            Err(err) => {
                warn!(%project_id, %err, "board load failed");
                self.board = BoardState::new();
                let failure = BoardLoadError::Store(err);
                self.phase = BoardPhase::Failed(failure.clone());
                Err(failure)
            }
        }
    }

    /// Returns the load phase.
    #[must_use]
    pub const fn phase(&self) -> &BoardPhase {
        &self.phase
    }

    /// Returns the open project, if one was accepted.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the view flags.
    #[must_use]
    pub const fn config(&self) -> BoardViewConfig {
        self.config
    }

    /// Returns the partition while the board is ready.
    #[must_use]
    pub const fn board(&self) -> Option<&BoardState> {
        match self.phase {
            BoardPhase::Ready => Some(&self.board),
            BoardPhase::Unloaded | BoardPhase::Failed(_) => None,
        }
    }

    /// Returns the tasks of one column while the board is ready.
    #[must_use]
    pub fn column_for(&self, status: TaskStatus) -> Option<Vec<&Task>> {
        self.board().map(|board| board.column_for(status))
    }

    /// Returns the gesture phase.
    #[must_use]
    pub const fn gesture_phase(&self) -> GesturePhase {
        self.controller.phase()
    }

    /// Returns the drag controller.
    #[must_use]
    pub const fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Picks up a task.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::BoardNotReady`] unless the board is loaded, plus
    /// any error from [`DragController::pick_up`].
    pub fn pick_up(&mut self, task_id: TaskId) -> Result<GestureId, DragError> {
        self.ensure_ready()?;
        self.controller.pick_up(&self.board, task_id)
    }

    /// Updates the hovered column of the current drag.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] when no task is being dragged.
    pub fn hover(&mut self, column: Option<TaskStatus>) -> Result<(), DragError> {
        self.controller.hover(column)
    }

    /// Cancels an unreleased drag.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] when no unreleased drag exists.
    pub fn cancel_drag(&mut self) -> Result<GestureId, DragError> {
        self.controller.cancel()
    }

    /// Releases the dragged task. See [`DragController::release`].
    ///
    /// # Errors
    ///
    /// Returns [`DragError::BoardNotReady`] unless the board is loaded, plus
    /// any error from [`DragController::release`].
    pub fn release(&mut self, target: Option<TaskStatus>) -> Result<Release, DragError> {
        self.ensure_ready()?;
        self.controller.release(&mut self.board, target)
    }

    /// Feeds the store's answer for a pending drop back into the board.
    ///
    /// A rollback caused by the store records a [`Notification`].
    ///
    /// # Errors
    ///
    /// Returns [`DragError::StaleGesture`] when the gesture was abandoned or
    /// already resolved, plus any error from [`DragController::complete`].
    pub fn complete(
        &mut self,
        gesture_id: GestureId,
        result: TaskStoreResult<Task>,
    ) -> Result<GestureOutcome, DragError> {
        let outcome = self.controller.complete(&mut self.board, gesture_id, result)?;
        self.record_failure(&outcome);
        Ok(outcome)
    }

    /// Releases the dragged task and, when a store call is needed, awaits it
    /// and resolves the gesture.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`release`](Self::release) and
    /// [`complete`](Self::complete). Store failures are not errors here: they
    /// come back as a rolled-back outcome.
    pub async fn drop_on(&mut self, target: Option<TaskStatus>) -> Result<GestureOutcome, DragError> {
        match self.release(target)? {
            Release::Resolved(outcome) => Ok(outcome),
            Release::Pending(pending) => {
                let result = pending.persist(self.store.as_ref()).await;
                self.complete(pending.gesture_id(), result)
            }
        }
    }

    /// Returns the failure notices not yet dismissed, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Clears every failure notice.
    pub fn dismiss_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Renders the board for the presentation layer while it is ready.
    #[must_use]
    pub fn snapshot(&self) -> Option<BoardSnapshot> {
        let board = self.board()?;
        let project_id = self.project_id?;
        let feedback = DragFeedback {
            hovered: self.controller.hovered_column(),
            dragging: self.controller.dragging_task(),
        };
        Some(BoardSnapshot {
            project_id,
            config: self.config,
            columns: render_columns(board, feedback),
            pick_up_disabled: self.controller.is_releasing(),
        })
    }

    const fn ensure_ready(&self) -> Result<(), DragError> {
        match self.phase {
            BoardPhase::Ready => Ok(()),
            BoardPhase::Unloaded | BoardPhase::Failed(_) => Err(DragError::BoardNotReady),
        }
    }

    fn record_failure(&mut self, outcome: &GestureOutcome) {
        let GestureOutcome::RolledBack {
            gesture_id,
            task_id,
            restored,
            reason: RollbackReason::Store(err),
        } = outcome
        else {
            return;
        };
        if matches!(err, TaskStoreError::Validation(_)) {
            error!(%gesture_id, %task_id, %err, "store rejected status change as invalid");
        }
        self.notifications.push(Notification::status_change_failed(
            *gesture_id,
            *task_id,
            *restored,
            err,
            &*self.clock,
        ));
    }
}
