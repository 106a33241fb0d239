//! Derived-view computation over a board snapshot.
//!
//! # Responsibility
//! - Filter and sort the task list for presentation.
//! - Compute per-category progress tallies.
//!
//! # Invariants
//! - Pure functions over `&Board`: no side effects, no suspension, no errors.
//! - Filters evaluate in fixed order: category, search, priority,
//!   completed visibility.
//! - Sorting is stable; ties keep filtering order.
//! - Tallies are computed over the unfiltered board, not the filtered view.

use chrono::NaiveDate;

use crate::model::{Board, CategoryId, Priority, Task};

/// Category restriction for the task view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Only tasks assigned to this category.
    Only(CategoryId),
}

/// Priority restriction for the task view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    /// No restriction.
    #[default]
    All,
    /// Only tasks with this priority.
    Only(Priority),
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending by due date; tasks without one sort last.
    #[default]
    DueDate,
    /// Ascending by severity rank (low, medium, high).
    Priority,
}

/// View parameters for [`filtered_tasks`].
///
/// The default value is fully neutral: every filter is a no-op and completed
/// tasks are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub category: CategoryFilter,
    /// Case-insensitive substring match against the task title. Empty text
    /// restricts nothing.
    pub search: String,
    pub priority: PriorityFilter,
    /// When false, completed tasks are excluded.
    pub show_completed: bool,
    pub sort: SortKey,
}

impl Default for TaskView {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            search: String::new(),
            priority: PriorityFilter::All,
            show_completed: true,
            sort: SortKey::DueDate,
        }
    }
}

/// Returns the ordered, filtered task sequence for the given view.
pub fn filtered_tasks(board: &Board, view: &TaskView) -> Vec<Task> {
    let needle = view.search.to_lowercase();
    let mut tasks: Vec<Task> = board
        .tasks()
        .iter()
        .filter(|task| matches_view(task, view, &needle))
        .cloned()
        .collect();

    // Vec::sort_by is stable, which the tie-ordering contract relies on.
    match view.sort {
        SortKey::DueDate => tasks.sort_by(|a, b| due_date_key(a).cmp(&due_date_key(b))),
        SortKey::Priority => tasks.sort_by(|a, b| a.priority.rank().cmp(&b.priority.rank())),
    }

    tasks
}

fn matches_view(task: &Task, view: &TaskView, needle: &str) -> bool {
    if let CategoryFilter::Only(id) = view.category {
        if task.category != Some(id) {
            return false;
        }
    }
    if !needle.is_empty() && !task.title.to_lowercase().contains(needle) {
        return false;
    }
    if let PriorityFilter::Only(priority) = view.priority {
        if task.priority != priority {
            return false;
        }
    }
    if !view.show_completed && task.completed {
        return false;
    }
    true
}

// Undated tasks compare greater than any dated task.
fn due_date_key(task: &Task) -> (bool, Option<NaiveDate>) {
    (task.due_date.is_none(), task.due_date)
}

/// Task/completion tally for one category (or the whole board).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    /// Number of tasks assigned to the category.
    pub task_count: usize,
    /// Number of those tasks that are completed.
    pub completed_count: usize,
}

impl CategoryTally {
    fn record(&mut self, task: &Task) {
        self.task_count += 1;
        if task.completed {
            self.completed_count += 1;
        }
    }
}

/// Per-category progress tallies plus the synthetic "all" tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    /// Tally spanning every task, categorized or not.
    pub all: CategoryTally,
    /// One tally per known category, in board category order. Tasks with a
    /// dangling category reference count toward `all` only.
    pub per_category: Vec<(CategoryId, CategoryTally)>,
}

/// Computes progress tallies over the unfiltered board.
pub fn board_summary(board: &Board) -> BoardSummary {
    let mut all = CategoryTally::default();
    let mut per_category: Vec<(CategoryId, CategoryTally)> = board
        .categories()
        .iter()
        .map(|category| (category.id, CategoryTally::default()))
        .collect();

    for task in board.tasks() {
        all.record(task);
        if let Some(assigned) = task.category {
            if let Some((_, tally)) = per_category.iter_mut().find(|(id, _)| *id == assigned) {
                tally.record(task);
            }
        }
    }

    BoardSummary { all, per_category }
}
