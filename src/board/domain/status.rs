//! Task status columns and priority levels.

use super::{ParseTaskPriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board column a task belongs to.
///
/// The declaration order is the display order of the columns. It carries no
/// transition rules: any status may be reached from any other in one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work not yet started.
    #[serde(rename = "To Do")]
    ToDo,
    /// Work being implemented.
    #[serde(rename = "Work In Progress")]
    WorkInProgress,
    /// Work awaiting review.
    #[serde(rename = "Under Review")]
    UnderReview,
    /// Work finished.
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// All statuses in column display order.
    pub const ALL: [Self; 4] = [
        Self::ToDo,
        Self::WorkInProgress,
        Self::UnderReview,
        Self::Completed,
    ];

    /// Returns the label used on the wire and as the column heading.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::WorkInProgress => "Work In Progress",
            Self::UnderReview => "Under Review",
            Self::Completed => "Completed",
        }
    }

    /// Returns the zero-based column position.
    #[must_use]
    pub const fn column_index(self) -> usize {
        match self {
            Self::ToDo => 0,
            Self::WorkInProgress => 1,
            Self::UnderReview => 2,
            Self::Completed => 3,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "To Do" => Ok(Self::ToDo),
            "Work In Progress" => Ok(Self::WorkInProgress),
            "Under Review" => Ok(Self::UnderReview),
            "Completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional urgency label attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Needs attention immediately.
    Urgent,
    /// Important.
    High,
    /// Default urgency.
    Medium,
    /// Can wait.
    Low,
    /// Parked for later.
    Backlog,
}

impl TaskPriority {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Backlog => "Backlog",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "urgent" => Ok(Self::Urgent),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "backlog" => Ok(Self::Backlog),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
