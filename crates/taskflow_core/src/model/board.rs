//! In-memory board holding the current task and category collections.
//!
//! # Responsibility
//! - Own the single in-memory snapshot that the query engine reads.
//! - Expose whole-record mutations for the mutation engine only.
//!
//! # Invariants
//! - Ids are unique within each collection.
//! - Mutators are `pub(crate)`: only the in-crate mutation engine writes.
//! - Every mutation is applied whole; readers never observe a partially
//!   applied operation.

use super::category::{Category, CategoryId};
use super::task::{Task, TaskId};

/// Exclusive in-memory owner of the task and category collections.
///
/// The durable copy lives in the record store; `replace_all` resynchronizes
/// this snapshot from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks in board order (newest first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All categories in creation order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up one task by id.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Looks up one category by id.
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Inserts a confirmed new task at the front of the collection.
    pub(crate) fn insert_task_front(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Replaces the task with the same id, keeping its position.
    ///
    /// Returns `false` when no task with that id exists.
    pub(crate) fn replace_task(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    /// Removes the task with the given id.
    ///
    /// Returns `false` when no task with that id exists.
    pub(crate) fn remove_task(&mut self, id: TaskId) -> bool {
        match self.tasks.iter().position(|task| task.id == id) {
            Some(index) => {
                self.tasks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Appends a confirmed new category.
    pub(crate) fn append_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Replaces both collections wholesale with a fresh store snapshot.
    pub(crate) fn replace_all(&mut self, tasks: Vec<Task>, categories: Vec<Category>) {
        self.tasks = tasks;
        self.categories = categories;
    }
}
