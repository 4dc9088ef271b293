//! Task record as seen by the board.

use super::{BoardDomainError, TaskId, TaskPriority, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Weak reference to a user, with the display fields the store denormalizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    user_id: UserId,
    username: String,
    profile_picture_url: Option<String>,
}

impl UserRef {
    /// Creates a user reference.
    #[must_use]
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            profile_picture_url: None,
        }
    }

    /// Sets the profile picture URL.
    #[must_use]
    pub fn with_profile_picture_url(mut self, url: impl Into<String>) -> Self {
        self.profile_picture_url = Some(url.into());
        self
    }

    /// Returns the referenced user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn profile_picture_url(&self) -> Option<&str> {
        self.profile_picture_url.as_deref()
    }
}

/// File attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    file_url: String,
    file_name: Option<String>,
}

impl Attachment {
    /// Creates an attachment record.
    #[must_use]
    pub fn new(file_url: impl Into<String>, file_name: Option<String>) -> Self {
        Self {
            file_url: file_url.into(),
            file_name,
        }
    }

    /// Returns the file URL.
    #[must_use]
    pub fn file_url(&self) -> &str {
        &self.file_url
    }

    /// Returns the original file name, if recorded.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

/// Task record.
///
/// Only the status is ever mutated by the board; every other field is
/// replaced wholesale when the store returns a newer record. Records from
/// the store are built through the payload adapter, never deserialized
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: Option<TaskPriority>,
    points: Option<u32>,
    start_date: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
    tags: Option<String>,
    assignee: Option<UserRef>,
    author: Option<UserRef>,
    attachments: Vec<Attachment>,
    comment_count: usize,
}

impl Task {
    /// Creates a task with the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is blank.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        status: TaskStatus,
    ) -> Result<Self, BoardDomainError> {
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }

        Ok(Self {
            id,
            title: trimmed.to_owned(),
            description: None,
            status,
            priority: None,
            points: None,
            start_date: None,
            due_date: None,
            tags: None,
            assignee: None,
            author: None,
            attachments: Vec::new(),
            comment_count: 0,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the point estimate.
    #[must_use]
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    /// Sets the start date.
    #[must_use]
    pub fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the raw comma-delimited tag string.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Sets the assignee reference.
    #[must_use]
    pub fn with_assignee(mut self, assignee: UserRef) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the author reference.
    #[must_use]
    pub fn with_author(mut self, author: UserRef) -> Self {
        self.author = Some(author);
        self
    }

    /// Sets the attachments, preserving order.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Sets the number of comments on the task.
    #[must_use]
    pub fn with_comment_count(mut self, comment_count: usize) -> Self {
        self.comment_count = comment_count;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the point estimate, if any.
    #[must_use]
    pub const fn points(&self) -> Option<u32> {
        self.points
    }

    /// Returns the start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the raw tag string, if any.
    #[must_use]
    pub fn raw_tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    /// Returns the individual tags, trimmed, skipping empty entries.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&UserRef> {
        self.assignee.as_ref()
    }

    /// Returns the author, if any.
    #[must_use]
    pub const fn author(&self) -> Option<&UserRef> {
        self.author.as_ref()
    }

    /// Returns the attachments in upload order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the comment count.
    #[must_use]
    pub const fn comment_count(&self) -> usize {
        self.comment_count
    }

    pub(crate) fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}
