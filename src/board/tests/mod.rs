//! Unit tests for the task board.

mod retry_tests;
mod support;
