//! Column and card view models.

use crate::board::domain::{Attachment, BoardState, Task, TaskId, TaskPriority, TaskStatus};
use serde::Serialize;

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Drag state the renderer needs for styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragFeedback {
    /// Column currently under the dragged task.
    pub hovered: Option<TaskStatus>,
    /// Task being dragged or awaiting the store.
    pub dragging: Option<TaskId>,
}

/// One task as drawn inside a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCard {
    /// Drag handle identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Task description, if any.
    pub description: Option<String>,
    /// Priority badge, if any.
    pub priority: Option<TaskPriority>,
    /// Individual tags.
    pub tags: Vec<String>,
    /// First attachment, shown as the card cover.
    pub cover: Option<Attachment>,
    /// Assignee avatar URL.
    pub assignee_avatar_url: Option<String>,
    /// Number of comments.
    pub comment_count: usize,
    /// Point estimate, if any.
    pub points: Option<u32>,
    /// Due date as `YYYY-MM-DD`.
    pub due_date: Option<String>,
    /// Whether this card is the one being dragged.
    pub is_dragging: bool,
}

impl TaskCard {
    fn from_task(task: &Task, dragging: Option<TaskId>) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            priority: task.priority(),
            tags: task.tags().into_iter().map(str::to_owned).collect(),
            cover: task.attachments().first().cloned(),
            assignee_avatar_url: task
                .assignee()
                .and_then(|assignee| assignee.profile_picture_url())
                .map(str::to_owned),
            comment_count: task.comment_count(),
            points: task.points(),
            due_date: task
                .due_date()
                .map(|due| due.format(DUE_DATE_FORMAT).to_string()),
            is_dragging: dragging == Some(task.id()),
        }
    }
}

/// One status column and its drop target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    /// Drop target status.
    pub status: TaskStatus,
    /// Cards in store order.
    pub cards: Vec<TaskCard>,
    /// Whether a dragged task is over this column.
    pub is_hovered: bool,
}

impl ColumnView {
    /// Returns `true` when the column should show the empty drop hint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the heading, for example `To Do (3)`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} ({})", self.status, self.cards.len())
    }
}

/// Renders the four columns in display order.
#[must_use]
pub fn render_columns(board: &BoardState, feedback: DragFeedback) -> Vec<ColumnView> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| ColumnView {
            status,
            cards: board
                .column_for(status)
                .into_iter()
                .map(|task| TaskCard::from_task(task, feedback.dragging))
                .collect(),
            is_hovered: feedback.hovered == Some(status),
        })
        .collect()
}
