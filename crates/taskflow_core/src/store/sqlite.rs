//! SQLite-backed record store.
//!
//! # Responsibility
//! - Persist task and category records in the migrated SQLite schema.
//! - Keep SQL details inside the store boundary.
//!
//! # Invariants
//! - Timestamps persist as Unix epoch milliseconds.
//! - Due dates persist as ISO-8601 `YYYY-MM-DD` text.
//! - `created_at` is written once and never updated.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusqlite::{params, Connection, Row};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{CategoryStore, StoreError, StoreResult, TaskStore};
use crate::model::{Category, CategoryFields, CategoryId, Priority, Task, TaskFields, TaskId};

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    category,
    priority,
    due_date,
    completed,
    created_at,
    completed_at
FROM tasks";

const CATEGORY_SELECT_SQL: &str = "SELECT uuid, name, color FROM categories";

/// Record store over a migrated SQLite connection.
///
/// Methods are async to satisfy the store contract; SQL itself runs
/// synchronously under the connection lock.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wraps a connection produced by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl TaskStore for SqliteStore {
    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{TASK_SELECT_SQL} ORDER BY created_at DESC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    async fn get_task(&self, id: TaskId) -> StoreResult<Task> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_task_row(row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn create_task(&self, fields: TaskFields) -> StoreResult<Task> {
        let conn = self.conn.lock().await;
        let task = fields.into_task(Uuid::new_v4());
        conn.execute(
            "INSERT INTO tasks (
                uuid,
                title,
                category,
                priority,
                due_date,
                completed,
                created_at,
                completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                task.id.to_string(),
                task.title.as_str(),
                task.category.map(|id| id.to_string()),
                task.priority.as_str(),
                task.due_date.map(date_to_db),
                bool_to_int(task.completed),
                task.created_at.timestamp_millis(),
                task.completed_at.map(|at| at.timestamp_millis()),
            ],
        )?;
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> StoreResult<Task> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                category = ?2,
                priority = ?3,
                due_date = ?4,
                completed = ?5,
                completed_at = ?6
             WHERE uuid = ?7;",
            params![
                task.title.as_str(),
                task.category.map(|id| id.to_string()),
                task.priority.as_str(),
                task.due_date.map(date_to_db),
                bool_to_int(task.completed),
                task.completed_at.map(|at| at.timestamp_millis()),
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(task.id));
        }
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for SqliteStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Category> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!("{CATEGORY_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_category_row(row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn create_category(&self, fields: CategoryFields) -> StoreResult<Category> {
        let conn = self.conn.lock().await;
        let category = fields.into_category(Uuid::new_v4());
        conn.execute(
            "INSERT INTO categories (uuid, name, color) VALUES (?1, ?2, ?3);",
            params![
                category.id.to_string(),
                category.name.as_str(),
                category.color.as_str(),
            ],
        )?;
        Ok(category)
    }

    async fn update_category(&self, category: &Category) -> StoreResult<Category> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE categories SET name = ?1, color = ?2 WHERE uuid = ?3;",
            params![
                category.name.as_str(),
                category.color.as_str(),
                category.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(category.id));
        }
        Ok(category.clone())
    }

    async fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM categories WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let id = parse_uuid(&row.get::<_, String>("uuid")?, "tasks.uuid")?;

    let category = match row.get::<_, Option<String>>("category")? {
        Some(value) => Some(parse_uuid(&value, "tasks.category")?),
        None => None,
    };

    let priority_text: String = row.get("priority")?;
    let priority = parse_priority(&priority_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid priority `{priority_text}` in tasks.priority"
        ))
    })?;

    let due_date = match row.get::<_, Option<String>>("due_date")? {
        Some(value) => Some(NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
            StoreError::InvalidData(format!("invalid due date `{value}` in tasks.due_date"))
        })?),
        None => None,
    };

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let created_at = millis_to_datetime(row.get("created_at")?, "tasks.created_at")?;
    let completed_at = match row.get::<_, Option<i64>>("completed_at")? {
        Some(millis) => Some(millis_to_datetime(millis, "tasks.completed_at")?),
        None => None,
    };

    let task = Task {
        id,
        title: row.get("title")?,
        category,
        priority,
        due_date,
        completed,
        created_at,
        completed_at,
    };
    task.validate()
        .map_err(|err| StoreError::InvalidData(err.to_string()))?;
    Ok(task)
}

fn parse_category_row(row: &Row<'_>) -> StoreResult<Category> {
    Ok(Category {
        id: parse_uuid(&row.get::<_, String>("uuid")?, "categories.uuid")?,
        name: row.get("name")?,
        color: row.get("color")?,
    })
}

fn parse_uuid(value: &str, column: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

fn date_to_db(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn millis_to_datetime(millis: i64, column: &str) -> StoreResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
        StoreError::InvalidData(format!("invalid timestamp `{millis}` in {column}"))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
