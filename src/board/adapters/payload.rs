//! Validated parsing of task store payloads.
//!
//! The store speaks loosely typed JSON. Every record passes through
//! [`TaskPayload`] and is converted into the strict [`Task`] before it reaches
//! the board; anything that does not fit is reported as a
//! [`TaskStoreError::Validation`].

use crate::board::{
    domain::{Attachment, Task, TaskId, TaskPriority, TaskStatus, UserId, UserRef},
    ports::TaskStoreError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task record as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    tags: Option<String>,
    start_date: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
    points: Option<i64>,
    author: Option<UserPayload>,
    assignee: Option<UserPayload>,
    attachments: Option<Vec<AttachmentPayload>>,
    comments: Option<Vec<serde_json::Value>>,
}

/// Denormalized user fields embedded in a task payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    user_id: i64,
    username: String,
    profile_picture_url: Option<String>,
}

/// Attachment fields embedded in a task payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentPayload {
    #[serde(rename = "fileURL")]
    file_url: String,
    #[serde(rename = "fileName")]
    file_name: Option<String>,
}

/// Body of a status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdatePayload {
    /// Task being moved.
    pub task_id: u64,
    /// Target status label.
    pub status: TaskStatus,
}

impl StatusUpdatePayload {
    /// Builds the request body for a status change.
    #[must_use]
    pub const fn new(task_id: TaskId, status: TaskStatus) -> Self {
        Self {
            task_id: task_id.value(),
            status,
        }
    }
}

/// Parses a JSON array of task records.
///
/// # Errors
///
/// Returns [`TaskStoreError::Validation`] when the body is not an array of
/// well-formed task records.
pub fn parse_task_list(body: &str) -> Result<Vec<Task>, TaskStoreError> {
    let payloads: Vec<TaskPayload> = serde_json::from_str(body)
        .map_err(|err| TaskStoreError::validation(format!("malformed task list: {err}")))?;
    payloads.into_iter().map(Task::try_from).collect()
}

/// Parses a single JSON task record.
///
/// # Errors
///
/// Returns [`TaskStoreError::Validation`] when the body is not a well-formed
/// task record.
pub fn parse_task(body: &str) -> Result<Task, TaskStoreError> {
    let payload: TaskPayload = serde_json::from_str(body)
        .map_err(|err| TaskStoreError::validation(format!("malformed task: {err}")))?;
    Task::try_from(payload)
}

impl TryFrom<TaskPayload> for Task {
    type Error = TaskStoreError;

    fn try_from(payload: TaskPayload) -> Result<Self, Self::Error> {
        let id = TaskId::new(positive(payload.id, "task id")?)
            .map_err(|err| TaskStoreError::validation(err.to_string()))?;
        let raw_status = payload
            .status
            .ok_or_else(|| TaskStoreError::validation(format!("task {id} has no status")))?;
        let status = TaskStatus::try_from(raw_status.as_str())
            .map_err(|err| TaskStoreError::validation(format!("task {id}: {err}")))?;
        let title = payload.title.unwrap_or_default();
        let mut task = Self::new(id, title, status)
            .map_err(|err| TaskStoreError::validation(format!("task {id}: {err}")))?;

        if let Some(description) = non_blank(payload.description) {
            task = task.with_description(description);
        }
        if let Some(raw_priority) = non_blank(payload.priority) {
            let priority = TaskPriority::try_from(raw_priority.as_str())
                .map_err(|err| TaskStoreError::validation(format!("task {id}: {err}")))?;
            task = task.with_priority(priority);
        }
        if let Some(tags) = non_blank(payload.tags) {
            task = task.with_tags(tags);
        }
        if let Some(start_date) = payload.start_date {
            task = task.with_start_date(start_date);
        }
        if let Some(due_date) = payload.due_date {
            task = task.with_due_date(due_date);
        }
        if let Some(raw_points) = payload.points {
            let points = u32::try_from(raw_points).map_err(|_| {
                TaskStoreError::validation(format!("task {id}: invalid points {raw_points}"))
            })?;
            task = task.with_points(points);
        }
        if let Some(author) = payload.author {
            task = task.with_author(UserRef::try_from(author)?);
        }
        if let Some(assignee) = payload.assignee {
            task = task.with_assignee(UserRef::try_from(assignee)?);
        }

        let attachments = payload
            .attachments
            .unwrap_or_default()
            .into_iter()
            .map(|attachment| Attachment::new(attachment.file_url, attachment.file_name));
        let comment_count = payload.comments.map_or(0, |comments| comments.len());

        Ok(task
            .with_attachments(attachments)
            .with_comment_count(comment_count))
    }
}

impl TryFrom<UserPayload> for UserRef {
    type Error = TaskStoreError;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        let user_id = UserId::new(positive(payload.user_id, "user id")?)
            .map_err(|err| TaskStoreError::validation(err.to_string()))?;
        let user = Self::new(user_id, payload.username);
        Ok(match non_blank(payload.profile_picture_url) {
            Some(url) => user.with_profile_picture_url(url),
            None => user,
        })
    }
}

fn positive(value: i64, field: &str) -> Result<u64, TaskStoreError> {
    u64::try_from(value)
        .ok()
        .filter(|converted| *converted > 0)
        .ok_or_else(|| TaskStoreError::validation(format!("invalid {field} {value}")))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.trim().is_empty())
}
