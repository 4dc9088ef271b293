//! Application services for board interaction.

mod gesture;
mod notification;
mod session;

pub use gesture::{
    DragController, DragError, GestureOutcome, GesturePhase, PendingStatusChange, Release,
    RollbackReason,
};
pub use notification::{Notification, Severity};
pub use session::{BoardLoadError, BoardPhase, BoardSession, BoardSnapshot};
