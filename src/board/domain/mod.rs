//! Domain model for the task board.
//!
//! The board domain covers the task record, the fixed status columns, and
//! the column partition the view renders. Store access and gesture
//! orchestration live outside this boundary.

mod board;
mod error;
mod ids;
mod status;
mod task;

pub use board::BoardState;
pub use error::{BoardDomainError, ParseTaskPriorityError, ParseTaskStatusError};
pub use ids::{GestureId, ProjectId, TaskId, UserId};
pub use status::{TaskPriority, TaskStatus};
pub use task::{Attachment, Task, UserRef};
