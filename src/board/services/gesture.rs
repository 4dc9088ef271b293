//! Drag gesture state machine.
//!
//! A gesture moves through `Idle → Dragging → (hover over columns)* →
//! Releasing` and ends either committed or rolled back. The only suspension
//! point is the store call issued between [`DragController::release`] and
//! [`DragController::complete`]; pick-up stays disabled for that whole
//! window so at most one gesture is ever in flight per board.

use crate::board::{
    domain::{BoardDomainError, BoardState, GestureId, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors returned when a gesture event does not fit the current state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DragError {
    /// A task is already being dragged.
    #[error("gesture {0} is already dragging a task")]
    GestureInProgress(GestureId),

    /// The previous gesture is still waiting for the store.
    #[error("pick-up is disabled until gesture {0} resolves")]
    PickUpDisabled(GestureId),

    /// The event needs an active drag but none is in progress.
    #[error("no task is being dragged")]
    NotDragging,

    /// The completion does not belong to the gesture awaiting the store.
    #[error("gesture {0} is not awaiting a store response")]
    StaleGesture(GestureId),

    /// The board has not been loaded.
    #[error("the board is not loaded")]
    BoardNotReady,

    /// The board rejected the mutation.
    #[error(transparent)]
    Board(#[from] BoardDomainError),
}

/// Externally visible phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No gesture in progress.
    Idle,
    /// A task is picked up and may be hovering over a column.
    Dragging,
    /// A task was dropped and the store has not answered yet.
    Releasing,
}

/// Why a gesture ended without changing the task's status.
#[derive(Debug, Clone)]
pub enum RollbackReason {
    /// The task was released outside every column.
    NoDropTarget,
    /// The store refused or failed the status change.
    Store(TaskStoreError),
}

/// Terminal result of a gesture.
#[derive(Debug, Clone)]
pub enum GestureOutcome {
    /// The task holds its new status.
    Committed {
        /// Gesture that finished.
        gesture_id: GestureId,
        /// Task that was moved.
        task_id: TaskId,
        /// Final status, as confirmed by the store when one was called.
        status: TaskStatus,
    },
    /// The task is back in its pre-drag column.
    RolledBack {
        /// Gesture that finished.
        gesture_id: GestureId,
        /// Task that was moved.
        task_id: TaskId,
        /// Status the task was restored to.
        restored: TaskStatus,
        /// What caused the rollback.
        reason: RollbackReason,
    },
}

impl GestureOutcome {
    /// Returns the gesture identifier.
    #[must_use]
    pub const fn gesture_id(&self) -> GestureId {
        match self {
            Self::Committed { gesture_id, .. } | Self::RolledBack { gesture_id, .. } => {
                *gesture_id
            }
        }
    }

    /// Returns the task the gesture moved.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Committed { task_id, .. } | Self::RolledBack { task_id, .. } => *task_id,
        }
    }

    /// Returns `true` when the gesture committed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Returns the store failure behind a rollback, if any.
    #[must_use]
    pub const fn store_error(&self) -> Option<&TaskStoreError> {
        match self {
            Self::RolledBack {
                reason: RollbackReason::Store(err),
                ..
            } => Some(err),
            _ => None,
        }
    }
}

/// Status change that has been applied optimistically and still needs the
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStatusChange {
    gesture_id: GestureId,
    task_id: TaskId,
    from: TaskStatus,
    to: TaskStatus,
}

impl PendingStatusChange {
    /// Returns the gesture that produced this change.
    #[must_use]
    pub const fn gesture_id(&self) -> GestureId {
        self.gesture_id
    }

    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the pre-drag status.
    #[must_use]
    pub const fn previous_status(&self) -> TaskStatus {
        self.from
    }

    /// Returns the target status.
    #[must_use]
    pub const fn target_status(&self) -> TaskStatus {
        self.to
    }

    /// Issues the single store call for this change.
    ///
    /// # Errors
    ///
    /// Returns whatever the store returns; the caller hands the result to
    /// [`DragController::complete`] either way.
    pub async fn persist<S>(&self, store: &S) -> TaskStoreResult<Task>
    where
        S: TaskStore + ?Sized,
    {
        store.set_task_status(self.task_id, self.to).await
    }
}

/// Result of releasing a dragged task.
#[derive(Debug, Clone)]
pub enum Release {
    /// The gesture finished without a store call.
    Resolved(GestureOutcome),
    /// The board was updated optimistically and the store must confirm.
    Pending(PendingStatusChange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveGesture {
    id: GestureId,
    task_id: TaskId,
    origin: TaskStatus,
    hovered: Option<TaskStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ControllerState {
    #[default]
    Idle,
    Dragging(ActiveGesture),
    Releasing(PendingStatusChange),
}

/// Per-board controller for drag gestures.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: ControllerState,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        match self.state {
            ControllerState::Idle => GesturePhase::Idle,
            ControllerState::Dragging(_) => GesturePhase::Dragging,
            ControllerState::Releasing(_) => GesturePhase::Releasing,
        }
    }

    /// Returns `true` while a store call is outstanding.
    #[must_use]
    pub const fn is_releasing(&self) -> bool {
        matches!(self.state, ControllerState::Releasing(_))
    }

    /// Returns the task being dragged or awaiting the store.
    #[must_use]
    pub const fn dragging_task(&self) -> Option<TaskId> {
        match self.state {
            ControllerState::Idle => None,
            ControllerState::Dragging(gesture) => Some(gesture.task_id),
            ControllerState::Releasing(pending) => Some(pending.task_id),
        }
    }

    /// Returns the column currently under the dragged task.
    #[must_use]
    pub const fn hovered_column(&self) -> Option<TaskStatus> {
        match self.state {
            ControllerState::Dragging(gesture) => gesture.hovered,
            ControllerState::Idle | ControllerState::Releasing(_) => None,
        }
    }

    /// Returns the change awaiting the store, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<PendingStatusChange> {
        match self.state {
            ControllerState::Releasing(pending) => Some(pending),
            ControllerState::Idle | ControllerState::Dragging(_) => None,
        }
    }

    /// Picks up a task and starts a gesture.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::GestureInProgress`] while another task is being
    /// dragged, [`DragError::PickUpDisabled`] while a drop awaits the store,
    /// and [`DragError::Board`] when the task is not on the board.
    pub fn pick_up(&mut self, board: &BoardState, task_id: TaskId) -> Result<GestureId, DragError> {
        match self.state {
            ControllerState::Dragging(gesture) => Err(DragError::GestureInProgress(gesture.id)),
            ControllerState::Releasing(pending) => {
                Err(DragError::PickUpDisabled(pending.gesture_id))
            }
            ControllerState::Idle => {
                let origin = board
                    .status_of(task_id)
                    .ok_or(BoardDomainError::UnknownTask(task_id))?;
                let gesture = ActiveGesture {
                    id: GestureId::new(),
                    task_id,
                    origin,
                    hovered: None,
                };
                debug!(gesture_id = %gesture.id, %task_id, %origin, "task picked up");
                self.state = ControllerState::Dragging(gesture);
                Ok(gesture.id)
            }
        }
    }

    /// Marks the column under the dragged task, or clears it with `None`.
    ///
    /// Hovering is feedback only and never touches the board.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] when no task is being dragged.
    pub fn hover(&mut self, column: Option<TaskStatus>) -> Result<(), DragError> {
        let ControllerState::Dragging(gesture) = &mut self.state else {
            return Err(DragError::NotDragging);
        };
        gesture.hovered = column;
        Ok(())
    }

    /// Abandons a drag that has not been released yet.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] when no unreleased drag exists.
    pub fn cancel(&mut self) -> Result<GestureId, DragError> {
        let ControllerState::Dragging(gesture) = self.state else {
            return Err(DragError::NotDragging);
        };
        debug!(gesture_id = %gesture.id, "drag cancelled");
        self.state = ControllerState::Idle;
        Ok(gesture.id)
    }

    /// Forgets any gesture, including one awaiting the store.
    ///
    /// Used when the board is reloaded or torn down. A later
    /// [`complete`](Self::complete) for the forgotten gesture is reported as
    /// stale and leaves the board alone.
    pub fn abandon(&mut self) -> Option<GestureId> {
        let abandoned = match self.state {
            ControllerState::Idle => None,
            ControllerState::Dragging(gesture) => Some(gesture.id),
            ControllerState::Releasing(pending) => Some(pending.gesture_id),
        };
        if let Some(gesture_id) = abandoned {
            debug!(%gesture_id, "gesture abandoned");
        }
        self.state = ControllerState::Idle;
        abandoned
    }

    /// Releases the dragged task over `target`, or outside every column when
    /// `target` is `None`.
    ///
    /// Dropping onto the task's own column commits with no store call and
    /// no board change. Dropping outside every column rolls back with no
    /// store call. Any other drop moves the task on the board immediately
    /// and returns the change the caller must persist.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] when no task is being dragged and
    /// [`DragError::Board`] when the board no longer holds the task.
    pub fn release(
        &mut self,
        board: &mut BoardState,
        target: Option<TaskStatus>,
    ) -> Result<Release, DragError> {
        let ControllerState::Dragging(gesture) = self.state else {
            return Err(DragError::NotDragging);
        };

        let Some(to) = target else {
            board.revert(gesture.task_id, gesture.origin)?;
            self.state = ControllerState::Idle;
            debug!(gesture_id = %gesture.id, "released outside every column");
            return Ok(Release::Resolved(GestureOutcome::RolledBack {
                gesture_id: gesture.id,
                task_id: gesture.task_id,
                restored: gesture.origin,
                reason: RollbackReason::NoDropTarget,
            }));
        };

        if to == gesture.origin {
            self.state = ControllerState::Idle;
            debug!(gesture_id = %gesture.id, status = %to, "dropped onto own column");
            return Ok(Release::Resolved(GestureOutcome::Committed {
                gesture_id: gesture.id,
                task_id: gesture.task_id,
                status: to,
            }));
        }

        board.apply_optimistic(gesture.task_id, to)?;
        let pending = PendingStatusChange {
            gesture_id: gesture.id,
            task_id: gesture.task_id,
            from: gesture.origin,
            to,
        };
        self.state = ControllerState::Releasing(pending);
        debug!(
            gesture_id = %gesture.id,
            task_id = %gesture.task_id,
            from = %gesture.origin,
            %to,
            "optimistic move applied"
        );
        Ok(Release::Pending(pending))
    }

    /// Resolves the gesture awaiting the store with the store's answer.
    ///
    /// On success the returned record replaces the board's copy, which also
    /// corrects the column if the store settled on a different status. On
    /// failure the task goes back to its pre-drag column.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::StaleGesture`] when `gesture_id` is not the
    /// gesture awaiting the store; the result is discarded and the board is
    /// untouched. Returns [`DragError::Board`] when the board no longer holds
    /// the task.
    pub fn complete(
        &mut self,
        board: &mut BoardState,
        gesture_id: GestureId,
        result: TaskStoreResult<Task>,
    ) -> Result<GestureOutcome, DragError> {
        let pending = match self.state {
            ControllerState::Releasing(pending) if pending.gesture_id == gesture_id => pending,
            ControllerState::Idle
            | ControllerState::Dragging(_)
            | ControllerState::Releasing(_) => {
                debug!(%gesture_id, "discarding response for stale gesture");
                return Err(DragError::StaleGesture(gesture_id));
            }
        };
        self.state = ControllerState::Idle;

        let confirmed = result.and_then(|task| {
            if task.id() == pending.task_id {
                Ok(task)
            } else {
                Err(TaskStoreError::validation(format!(
                    "store confirmed task {} for a move of task {}",
                    task.id(),
                    pending.task_id
                )))
            }
        });

        match confirmed {
            Ok(task) => {
                let status = task.status();
                if status != pending.to {
                    info!(
                        %gesture_id,
                        task_id = %pending.task_id,
                        requested = %pending.to,
                        %status,
                        "store overrode requested status"
                    );
                }
                board.reconcile(task)?;
                info!(%gesture_id, task_id = %pending.task_id, %status, "status change committed");
                Ok(GestureOutcome::Committed {
                    gesture_id,
                    task_id: pending.task_id,
                    status,
                })
            }
            Err(err) => {
                board.revert(pending.task_id, pending.from)?;
                warn!(
                    %gesture_id,
                    task_id = %pending.task_id,
                    restored = %pending.from,
                    %err,
                    "status change rolled back"
                );
                Ok(GestureOutcome::RolledBack {
                    gesture_id,
                    task_id: pending.task_id,
                    restored: pending.from,
                    reason: RollbackReason::Store(err),
                })
            }
        }
    }
}
