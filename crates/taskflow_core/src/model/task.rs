//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its creation/patch inputs.
//! - Keep partial updates typed instead of ad-hoc field merging.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is assigned once and is not patchable.
//! - `completed_at` is `Some` exactly when `completed` is true.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryId;
use super::ValidationError;

/// Stable identifier for a task record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Task urgency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Severity rank used for priority sorting: low=1, medium=2, high=3.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical task record.
///
/// Field names serialize in camelCase to match the external record schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable id assigned by the record store at creation.
    pub id: TaskId,
    /// Non-empty display title.
    pub title: String,
    /// Optional category reference. Dangling references are tolerated and
    /// treated as uncategorized by consumers.
    pub category: Option<CategoryId>,
    pub priority: Priority,
    /// Calendar date without a time component.
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    /// Set once at creation, immutable thereafter.
    pub created_at: DateTime<Utc>,
    /// Set on the false->true completion transition, cleared on true->false.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Checks record-level invariants.
    ///
    /// Write paths must call this before any store mutation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.completed != self.completed_at.is_some() {
            return Err(ValidationError::CompletionTimestampMismatch);
        }
        Ok(())
    }
}

/// Creation input accepted by the mutation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub category: Option<CategoryId>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// Creates an input with default priority and no category or due date.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: None,
            priority: Priority::default(),
            due_date: None,
        }
    }
}

/// Field set persisted when the store materializes a new task record.
///
/// The store assigns the id; everything else is decided by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub title: String,
    pub category: Option<CategoryId>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskFields {
    /// Materializes a full record once the store has assigned an id.
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            category: self.category,
            priority: self.priority,
            due_date: self.due_date,
            completed: self.completed,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

/// Typed partial update over an existing task.
///
/// An outer `None` leaves the field untouched; `Some` replaces it, including
/// `Some(None)` for clearable fields. `id` and `created_at` cannot be
/// patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub category: Option<Option<CategoryId>>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Merges this patch over `current`, patch fields winning.
    ///
    /// The merged record is returned unvalidated; callers validate before
    /// persisting.
    pub fn apply_to(&self, current: &Task) -> Task {
        Task {
            id: current.id,
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            category: self.category.unwrap_or(current.category),
            priority: self.priority.unwrap_or(current.priority),
            due_date: self.due_date.unwrap_or(current.due_date),
            completed: self.completed.unwrap_or(current.completed),
            created_at: current.created_at,
            completed_at: self.completed_at.unwrap_or(current.completed_at),
        }
    }
}
