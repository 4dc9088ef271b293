//! Transient notices raised when a status change is rolled back.

use crate::board::{
    domain::{GestureId, TaskId, TaskStatus},
    ports::TaskStoreError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// How loudly the view should present a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Recoverable failure, for example a dropped connection.
    Warning,
    /// The store rejected the request as malformed.
    Error,
}

/// Non-blocking notice surfaced to the user after a rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    gesture_id: GestureId,
    task_id: TaskId,
    severity: Severity,
    message: String,
    raised_at: DateTime<Utc>,
}

impl Notification {
    /// Builds the notice for a status change the store did not accept.
    #[must_use]
    pub fn status_change_failed(
        gesture_id: GestureId,
        task_id: TaskId,
        restored: TaskStatus,
        err: &TaskStoreError,
        clock: &impl Clock,
    ) -> Self {
        let severity = match err {
            TaskStoreError::Validation(_) => Severity::Error,
            TaskStoreError::Network(_)
            | TaskStoreError::NotFound(_)
            | TaskStoreError::Conflict(_) => Severity::Warning,
        };
        let message = match err {
            TaskStoreError::Conflict(_) => format!(
                "Task {task_id} was changed or removed by someone else and stays in '{restored}'"
            ),
            TaskStoreError::Network(_) | TaskStoreError::NotFound(_) => {
                format!("Could not move task {task_id}; it stays in '{restored}'")
            }
            TaskStoreError::Validation(detail) => {
                format!("Task {task_id} could not be moved ({detail}); it stays in '{restored}'")
            }
        };

        Self {
            gesture_id,
            task_id,
            severity,
            message,
            raised_at: clock.utc(),
        }
    }

    /// Returns the gesture that failed.
    #[must_use]
    pub const fn gesture_id(&self) -> GestureId {
        self.gesture_id
    }

    /// Returns the task that was moved back.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the notice was raised.
    #[must_use]
    pub const fn raised_at(&self) -> DateTime<Utc> {
        self.raised_at
    }
}
