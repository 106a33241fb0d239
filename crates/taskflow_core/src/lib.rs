//! Core task/category state management and query engine for TaskFlow.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    Board, Category, CategoryFields, CategoryId, NewTask, Priority, Task, TaskFields, TaskId,
    TaskPatch, ValidationError, DEFAULT_CATEGORY_COLOR,
};
pub use query::{
    board_summary, filtered_tasks, BoardSummary, CategoryFilter, CategoryTally, PriorityFilter,
    SortKey, TaskView,
};
pub use service::{Tracker, TrackerError, TrackerResult};
pub use store::{
    CategoryStore, MemoryStore, SqliteStore, StoreError, StoreResult, TaskStore,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
