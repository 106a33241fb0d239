//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskflow_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use taskflow_core::{
    board_summary, filtered_tasks, MemoryStore, NewTask, Priority, SortKey, TaskView, Tracker,
};

#[tokio::main]
async fn main() {
    println!("taskflow_core version={}", taskflow_core::core_version());

    let mut tracker = Tracker::new(MemoryStore::new());

    let errands = tracker
        .create_category("Errands")
        .await
        .expect("category creation against the in-memory store should succeed");

    let mut groceries = NewTask::new("Buy groceries");
    groceries.category = Some(errands.id);
    groceries.priority = Priority::High;
    tracker
        .create_task(groceries)
        .await
        .expect("task creation against the in-memory store should succeed");

    let review = tracker
        .create_task(NewTask::new("Write weekly review"))
        .await
        .expect("task creation against the in-memory store should succeed");
    tracker
        .toggle_complete(review.id)
        .await
        .expect("toggle against the in-memory store should succeed");

    let view = TaskView {
        sort: SortKey::Priority,
        ..TaskView::default()
    };
    for task in filtered_tasks(tracker.board(), &view) {
        println!(
            "task priority={} completed={} title={}",
            task.priority, task.completed, task.title
        );
    }

    let summary = board_summary(tracker.board());
    println!(
        "summary tasks={} completed={} categories={}",
        summary.all.task_count,
        summary.all.completed_count,
        summary.per_category.len()
    );
}
