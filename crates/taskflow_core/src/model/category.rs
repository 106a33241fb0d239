//! Category domain model.
//!
//! # Responsibility
//! - Define the category record and its creation input.
//!
//! # Invariants
//! - `id` is stable and never reused for another category.
//! - Name uniqueness is design intent only and is not enforced here.
//! - Categories are never auto-deleted when tasks still reference them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// Stable identifier for a category record.
pub type CategoryId = Uuid;

/// Neutral swatch assigned to categories created without an explicit color.
pub const DEFAULT_CATEGORY_COLOR: &str = "#94a3b8";

/// User-defined grouping for tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable id assigned by the record store at creation.
    pub id: CategoryId,
    /// Non-empty display name.
    pub name: String,
    /// Display attribute, opaque to core logic.
    pub color: String,
}

impl Category {
    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        Ok(())
    }
}

/// Field set persisted when the store materializes a new category record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFields {
    pub name: String,
    pub color: String,
}

impl CategoryFields {
    /// Materializes a full record once the store has assigned an id.
    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            color: self.color,
        }
    }
}
