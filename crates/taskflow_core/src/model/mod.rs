//! Domain model for tasks, categories and the in-memory board.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own input validation shared by every write path.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - `Task::completed_at` is set exactly when `Task::completed` is true.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod board;
pub mod category;
pub mod task;

pub use board::Board;
pub use category::{Category, CategoryFields, CategoryId, DEFAULT_CATEGORY_COLOR};
pub use task::{NewTask, Priority, Task, TaskFields, TaskId, TaskPatch};

/// Validation error raised before any record reaches the store.
///
/// Each variant names the offending field so callers can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty after trimming surrounding whitespace.
    EmptyTitle,
    /// Task references a category id absent from the board.
    UnknownCategory(CategoryId),
    /// Category name is empty after trimming surrounding whitespace.
    EmptyCategoryName,
    /// `completed` and `completed_at` disagree after a merge.
    CompletionTimestampMismatch,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::UnknownCategory(id) => write!(f, "unknown category id: {id}"),
            Self::EmptyCategoryName => write!(f, "category name must not be empty"),
            Self::CompletionTimestampMismatch => write!(
                f,
                "completed_at must be set exactly when completed is true"
            ),
        }
    }
}

impl Error for ValidationError {}
