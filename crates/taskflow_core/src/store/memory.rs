//! In-memory record store for development and tests.
//!
//! # Responsibility
//! - Provide a fully functional store without any external backing.
//! - Support injected one-shot failures for persistence-failure tests.
//!
//! # Invariants
//! - Created tasks are inserted at the front (newest first).
//! - Categories keep creation order.
//! - An injected failure consumes itself on the next request.

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{CategoryStore, StoreError, StoreResult, TaskStore};
use crate::model::{Category, CategoryFields, CategoryId, Task, TaskFields, TaskId};

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    categories: Vec<Category>,
    fail_next: Option<String>,
}

/// Record store keeping every record in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next store request fail with a backend error.
    ///
    /// Used by tests to verify that a failed round-trip leaves callers'
    /// state untouched.
    pub async fn fail_next_request(&self, message: impl Into<String>) {
        self.inner.lock().await.fail_next = Some(message.into());
    }

    async fn checked_lock(&self) -> StoreResult<tokio::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().await;
        if let Some(message) = inner.fail_next.take() {
            return Err(StoreError::Backend(message));
        }
        Ok(inner)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.checked_lock().await?.tasks.clone())
    }

    async fn get_task(&self, id: TaskId) -> StoreResult<Task> {
        self.checked_lock()
            .await?
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create_task(&self, fields: TaskFields) -> StoreResult<Task> {
        let mut inner = self.checked_lock().await?;
        let task = fields.into_task(Uuid::new_v4());
        inner.tasks.insert(0, task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> StoreResult<Task> {
        let mut inner = self.checked_lock().await?;
        let slot = inner
            .tasks
            .iter_mut()
            .find(|existing| existing.id == task.id)
            .ok_or(StoreError::NotFound(task.id))?;
        *slot = task.clone();
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> StoreResult<()> {
        let mut inner = self.checked_lock().await?;
        let index = inner
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        inner.tasks.remove(index);
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.checked_lock().await?.categories.clone())
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Category> {
        self.checked_lock()
            .await?
            .categories
            .iter()
            .find(|category| category.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create_category(&self, fields: CategoryFields) -> StoreResult<Category> {
        let mut inner = self.checked_lock().await?;
        let category = fields.into_category(Uuid::new_v4());
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, category: &Category) -> StoreResult<Category> {
        let mut inner = self.checked_lock().await?;
        let slot = inner
            .categories
            .iter_mut()
            .find(|existing| existing.id == category.id)
            .ok_or(StoreError::NotFound(category.id))?;
        *slot = category.clone();
        Ok(category.clone())
    }

    async fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let mut inner = self.checked_lock().await?;
        let index = inner
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or(StoreError::NotFound(id))?;
        inner.categories.remove(index);
        Ok(())
    }
}
