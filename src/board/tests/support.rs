//! Shared builders for board unit tests.

use crate::board::domain::{Task, TaskId, TaskStatus};

pub fn task_id(value: u64) -> TaskId {
    TaskId::new(value).expect("positive task id")
}

pub fn task(id: u64, status: TaskStatus) -> Task {
    Task::new(task_id(id), format!("Task {id}"), status).expect("valid task")
}

/// Six tasks spread over every column, interleaved so that column order and
/// source order differ from id order only by status.
pub fn mixed_tasks() -> Vec<Task> {
    vec![
        task(1, TaskStatus::ToDo),
        task(2, TaskStatus::Completed),
        task(3, TaskStatus::ToDo),
        task(4, TaskStatus::WorkInProgress),
        task(5, TaskStatus::UnderReview),
        task(6, TaskStatus::WorkInProgress),
    ]
}

pub fn column_ids(tasks: &[&Task]) -> Vec<u64> {
    tasks.iter().map(|task| task.id().value()).collect()
}
