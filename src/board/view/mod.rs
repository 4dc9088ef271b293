//! Presentation model of the board.
//!
//! Everything here is a pure function of the board and the gesture state;
//! the rendering toolkit consumes these values as-is.

mod columns;

pub use columns::{ColumnView, DragFeedback, TaskCard, render_columns};
