//! Record store contracts and implementations.
//!
//! # Responsibility
//! - Define the asynchronous CRUD boundary the mutation engine talks to.
//! - Keep persistence details behind per-entity store traits.
//!
//! # Invariants
//! - The store assigns record ids on create.
//! - `list_*` returns the current snapshot in stable order (tasks newest
//!   first, categories in creation order) and never fails with not-found.
//! - Read paths reject corrupt persisted state instead of masking it.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::db::DbError;
use crate::model::{Category, CategoryFields, CategoryId, Task, TaskFields, TaskId};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surfaced by record store implementations.
#[derive(Debug)]
pub enum StoreError {
    /// Referenced record id is absent from the store.
    NotFound(Uuid),
    /// Opaque backend failure for a structurally valid request.
    Backend(String),
    /// SQLite layer failure.
    Db(DbError),
    /// Persisted row does not parse back into a valid record.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Backend(message) => write!(f, "store backend failure: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Backend(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Asynchronous CRUD contract for task records.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns the current task snapshot, newest first. May be empty.
    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;
    /// Gets one task by id.
    async fn get_task(&self, id: TaskId) -> StoreResult<Task>;
    /// Persists a new task; the store assigns the id.
    async fn create_task(&self, fields: TaskFields) -> StoreResult<Task>;
    /// Persists the full record identified by `task.id`.
    async fn update_task(&self, task: &Task) -> StoreResult<Task>;
    /// Removes one task by id.
    async fn delete_task(&self, id: TaskId) -> StoreResult<()>;
}

/// Asynchronous CRUD contract for category records.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Returns the current category snapshot. May be empty.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    /// Gets one category by id.
    async fn get_category(&self, id: CategoryId) -> StoreResult<Category>;
    /// Persists a new category; the store assigns the id.
    async fn create_category(&self, fields: CategoryFields) -> StoreResult<Category>;
    /// Persists the full record identified by `category.id`.
    async fn update_category(&self, category: &Category) -> StoreResult<Category>;
    /// Removes one category by id.
    async fn delete_category(&self, id: CategoryId) -> StoreResult<()>;
}
