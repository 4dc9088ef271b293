//! Partition of a project's tasks into status columns.

use super::{BoardDomainError, Task, TaskId, TaskStatus};
use std::collections::HashMap;

/// Column partition the board renders.
///
/// Tasks are kept in source order. Each column holds the positions of the
/// tasks whose status matches it, sorted ascending, so a column always lists
/// its tasks in the order the store returned them. Every task position lives
/// in exactly one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    tasks: Vec<Task>,
    positions: HashMap<TaskId, usize>,
    columns: [Vec<usize>; 4],
}

impl BoardState {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board populated from the given tasks.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut board = Self::new();
        board.load(tasks);
        board
    }

    /// Replaces the whole partition with a fresh task collection.
    ///
    /// Identifiers are expected to be unique. If the store ever returns a
    /// duplicate, both records are kept in their columns and lookups by id
    /// resolve to the first one.
    pub fn load(&mut self, tasks: Vec<Task>) {
        let mut positions = HashMap::with_capacity(tasks.len());
        let mut columns: [Vec<usize>; 4] = Default::default();
        for (position, task) in tasks.iter().enumerate() {
            positions.entry(task.id()).or_insert(position);
            if let Some(column) = columns.get_mut(task.status().column_index()) {
                column.push(position);
            }
        }
        self.tasks = tasks;
        self.positions = positions;
        self.columns = columns;
    }

    /// Returns the tasks in the given column, in source order.
    #[must_use]
    pub fn column_for(&self, status: TaskStatus) -> Vec<&Task> {
        self.column_positions(status)
            .iter()
            .filter_map(|position| self.tasks.get(*position))
            .collect()
    }

    /// Returns the number of tasks in each column, in display order.
    #[must_use]
    pub fn counts(&self) -> [(TaskStatus, usize); 4] {
        TaskStatus::ALL.map(|status| (status, self.column_positions(status).len()))
    }

    /// Returns a task by identifier.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.positions
            .get(&task_id)
            .and_then(|position| self.tasks.get(*position))
    }

    /// Returns the current status of a task on the board.
    #[must_use]
    pub fn status_of(&self, task_id: TaskId) -> Option<TaskStatus> {
        self.task(task_id).map(Task::status)
    }

    /// Returns every task in source order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Provisionally moves a task to a new column ahead of store
    /// confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownTask`] when the task is not on the
    /// board.
    pub fn apply_optimistic(
        &mut self,
        task_id: TaskId,
        new_status: TaskStatus,
    ) -> Result<(), BoardDomainError> {
        self.move_task(task_id, new_status)
    }

    /// Moves a task back to the column it held before an optimistic move.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownTask`] when the task is not on the
    /// board.
    pub fn revert(
        &mut self,
        task_id: TaskId,
        old_status: TaskStatus,
    ) -> Result<(), BoardDomainError> {
        self.move_task(task_id, old_status)
    }

    /// Replaces a task with the record returned by the store and re-derives
    /// its column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownTask`] when the task is not on the
    /// board.
    pub fn reconcile(&mut self, task: Task) -> Result<(), BoardDomainError> {
        let task_id = task.id();
        let position = self.position_of(task_id)?;
        let target = task.status();
        let slot = self
            .tasks
            .get_mut(position)
            .ok_or(BoardDomainError::UnknownTask(task_id))?;
        let previous = slot.status();
        *slot = task;
        self.relocate(position, previous, target);
        Ok(())
    }

    fn move_task(
        &mut self,
        task_id: TaskId,
        new_status: TaskStatus,
    ) -> Result<(), BoardDomainError> {
        let position = self.position_of(task_id)?;
        let task = self
            .tasks
            .get_mut(position)
            .ok_or(BoardDomainError::UnknownTask(task_id))?;
        let previous = task.status();
        task.set_status(new_status);
        self.relocate(position, previous, new_status);
        Ok(())
    }

    fn position_of(&self, task_id: TaskId) -> Result<usize, BoardDomainError> {
        self.positions
            .get(&task_id)
            .copied()
            .ok_or(BoardDomainError::UnknownTask(task_id))
    }

    /// Moves one position between columns, keeping both sorted.
    fn relocate(&mut self, position: usize, from: TaskStatus, to: TaskStatus) {
        if from == to {
            return;
        }
        if let Some(column) = self.columns.get_mut(from.column_index()) {
            column.retain(|candidate| *candidate != position);
        }
        if let Some(column) = self.columns.get_mut(to.column_index()) {
            let insert_at = column.partition_point(|candidate| *candidate < position);
            column.insert(insert_at, position);
        }
    }

    fn column_positions(&self, status: TaskStatus) -> &[usize] {
        self.columns
            .get(status.column_index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
