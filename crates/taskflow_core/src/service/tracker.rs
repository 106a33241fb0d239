//! Task/category mutation engine.
//!
//! # Responsibility
//! - Apply create/update/delete/toggle operations against the record store
//!   and keep the in-memory board in sync with confirmed results.
//! - Validate inputs before any store round-trip.
//!
//! # Invariants
//! - The board is only mutated after the store confirms the operation; a
//!   failed round-trip leaves the board in its prior state.
//! - Mutations take `&mut self`, so no two operations interleave board
//!   writes.
//! - Store failures are surfaced to the caller, never masked as success.

use chrono::{DateTime, TimeZone, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

use crate::model::{
    Board, Category, CategoryFields, NewTask, Task, TaskFields, TaskId, TaskPatch,
    ValidationError, DEFAULT_CATEGORY_COLOR,
};
use crate::store::{CategoryStore, StoreError, TaskStore};

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Error surfaced by mutation operations.
#[derive(Debug)]
pub enum TrackerError {
    /// Malformed input; the store was never contacted.
    Validation(ValidationError),
    /// Referenced record id is absent from the board or the store.
    NotFound(Uuid),
    /// Store round-trip failed for a structurally valid request.
    Persistence(StoreError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Persistence(err) => write!(f, "persistence failure: {err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for TrackerError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for TrackerError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Persistence(other),
        }
    }
}

// Stores persist timestamps at millisecond precision; stamping at the same
// granularity keeps in-memory records equal to their persisted round-trip.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    Utc.timestamp_millis_opt(now.timestamp_millis())
        .single()
        .unwrap_or(now)
}

/// Mutation engine owning the board and the store handle.
///
/// All operations persist first and mutate the board only on success, so a
/// rejected round-trip needs no rollback.
pub struct Tracker<S> {
    store: S,
    board: Board,
}

impl<S: TaskStore + CategoryStore> Tracker<S> {
    /// Creates a tracker with an empty board.
    ///
    /// Call [`Tracker::refresh`] to pull the current store snapshot.
    pub fn new(store: S) -> Self {
        Self {
            store,
            board: Board::new(),
        }
    }

    /// Read access to the current board snapshot.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Re-pulls both collections from the store and replaces the board
    /// wholesale.
    pub async fn refresh(&mut self) -> TrackerResult<()> {
        let tasks = self.store.list_tasks().await?;
        let categories = self.store.list_categories().await?;
        info!(
            "event=board_refresh module=service status=ok tasks={} categories={}",
            tasks.len(),
            categories.len()
        );
        self.board.replace_all(tasks, categories);
        Ok(())
    }

    /// Creates a task and inserts the confirmed record at the front of the
    /// board.
    ///
    /// # Errors
    /// - `Validation` when the title is blank or the category reference does
    ///   not exist on the board; the store is not contacted.
    /// - `Persistence` when the store rejects the create.
    pub async fn create_task(&mut self, input: NewTask) -> TrackerResult<Task> {
        if input.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if let Some(category) = input.category {
            if self.board.category(category).is_none() {
                return Err(ValidationError::UnknownCategory(category).into());
            }
        }

        let fields = TaskFields {
            title: input.title,
            category: input.category,
            priority: input.priority,
            due_date: input.due_date,
            completed: false,
            created_at: now_millis(),
            completed_at: None,
        };
        let task = self.store.create_task(fields).await?;
        info!("event=task_create module=service status=ok id={}", task.id);
        self.board.insert_task_front(task.clone());
        Ok(task)
    }

    /// Merges `patch` over the existing record, persists the merged record
    /// and replaces it on the board.
    ///
    /// # Errors
    /// - `NotFound` when the id is absent from the board.
    /// - `Validation` when the merged record violates task invariants.
    /// - `Persistence` when the store rejects the update.
    pub async fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> TrackerResult<Task> {
        let current = self.board.task(id).ok_or(TrackerError::NotFound(id))?;
        let merged = patch.apply_to(current);
        merged.validate()?;

        let persisted = self.store.update_task(&merged).await?;
        info!("event=task_update module=service status=ok id={id}");
        self.board.replace_task(persisted.clone());
        Ok(persisted)
    }

    /// Deletes a task from the store, then removes it from the board.
    ///
    /// # Errors
    /// - `NotFound` when the id is absent from the board.
    /// - `Persistence` when the store rejects the delete.
    pub async fn delete_task(&mut self, id: TaskId) -> TrackerResult<()> {
        if self.board.task(id).is_none() {
            return Err(TrackerError::NotFound(id));
        }

        self.store.delete_task(id).await?;
        info!("event=task_delete module=service status=ok id={id}");
        self.board.remove_task(id);
        Ok(())
    }

    /// Flips the completion flag, stamping or clearing `completed_at`.
    ///
    /// Delegates to the [`Tracker::update_task`] merge-and-persist path.
    /// Applying it twice restores both fields to their original values.
    pub async fn toggle_complete(&mut self, id: TaskId) -> TrackerResult<Task> {
        let current = self.board.task(id).ok_or(TrackerError::NotFound(id))?;
        let now_completed = !current.completed;

        let patch = TaskPatch {
            completed: Some(now_completed),
            completed_at: Some(now_completed.then(now_millis)),
            ..TaskPatch::default()
        };
        self.update_task(id, patch).await
    }

    /// Creates a category with the default display color and appends it to
    /// the board.
    ///
    /// # Errors
    /// - `Validation` when the name is empty after trimming; the store is
    ///   not contacted.
    /// - `Persistence` when the store rejects the create.
    pub async fn create_category(&mut self, name: impl Into<String>) -> TrackerResult<Category> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCategoryName.into());
        }

        let fields = CategoryFields {
            name: trimmed.to_string(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
        };
        let category = self.store.create_category(fields).await?;
        info!(
            "event=category_create module=service status=ok id={}",
            category.id
        );
        self.board.append_category(category.clone());
        Ok(category)
    }
}
