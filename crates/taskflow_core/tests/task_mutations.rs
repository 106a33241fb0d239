use taskflow_core::{
    filtered_tasks, MemoryStore, NewTask, Priority, TaskPatch, TaskStore, TaskView, Tracker,
    TrackerError, ValidationError, DEFAULT_CATEGORY_COLOR,
};
use uuid::Uuid;

#[tokio::test]
async fn created_task_appears_once_and_first_in_neutral_view() {
    let mut tracker = Tracker::new(MemoryStore::new());
    tracker.create_task(NewTask::new("older")).await.unwrap();
    let created = tracker.create_task(NewTask::new("newest")).await.unwrap();

    assert!(!created.completed);
    assert_eq!(created.completed_at, None);

    let tasks = filtered_tasks(tracker.board(), &TaskView::default());
    let matching: Vec<_> = tasks.iter().filter(|task| task.id == created.id).collect();
    assert_eq!(matching.len(), 1);
    // Same-date (undated) peers keep board order, so the newest task leads.
    assert_eq!(tasks[0].id, created.id);
}

#[tokio::test]
async fn create_task_rejects_blank_title_without_store_contact() {
    let mut tracker = Tracker::new(MemoryStore::new());

    let err = tracker.create_task(NewTask::new("   ")).await.unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Validation(ValidationError::EmptyTitle)
    ));
    assert!(tracker.store().list_tasks().await.unwrap().is_empty());
    assert!(tracker.board().tasks().is_empty());
}

#[tokio::test]
async fn create_task_rejects_unknown_category_reference() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let missing = Uuid::new_v4();

    let mut input = NewTask::new("orphan");
    input.category = Some(missing);

    let err = tracker.create_task(input).await.unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Validation(ValidationError::UnknownCategory(id)) if id == missing
    ));
    assert!(tracker.board().tasks().is_empty());
}

#[tokio::test]
async fn toggle_complete_twice_restores_original_fields() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let created = tracker.create_task(NewTask::new("flip me")).await.unwrap();

    let completed = tracker.toggle_complete(created.id).await.unwrap();
    assert!(completed.completed);
    assert!(completed.completed_at.is_some());

    let reverted = tracker.toggle_complete(created.id).await.unwrap();
    assert_eq!(reverted.completed, created.completed);
    assert_eq!(reverted.completed_at, created.completed_at);
    assert_eq!(reverted.created_at, created.created_at);
}

#[tokio::test]
async fn update_task_merges_patch_and_preserves_other_fields() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let mut input = NewTask::new("draft");
    input.priority = Priority::Low;
    input.due_date = Some("2024-06-10".parse().unwrap());
    let created = tracker.create_task(input).await.unwrap();

    let patch = TaskPatch {
        title: Some("final".to_string()),
        priority: Some(Priority::High),
        ..TaskPatch::default()
    };
    let updated = tracker.update_task(created.id, patch).await.unwrap();

    assert_eq!(updated.title, "final");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.due_date, created.due_date);
    assert_eq!(updated.category, created.category);
    assert_eq!(updated.created_at, created.created_at);

    let on_board = tracker.board().task(created.id).unwrap();
    assert_eq!(on_board, &updated);
}

#[tokio::test]
async fn update_task_rejects_inconsistent_completion_patch() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let created = tracker.create_task(NewTask::new("strict")).await.unwrap();

    let patch = TaskPatch {
        completed: Some(true),
        ..TaskPatch::default()
    };
    let err = tracker.update_task(created.id, patch).await.unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Validation(ValidationError::CompletionTimestampMismatch)
    ));
    assert_eq!(tracker.board().task(created.id).unwrap(), &created);
}

#[tokio::test]
async fn update_missing_task_is_not_found() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let missing = Uuid::new_v4();

    let err = tracker
        .update_task(missing, TaskPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(id) if id == missing));
}

#[tokio::test]
async fn delete_missing_task_is_not_found_and_leaves_count_unchanged() {
    let mut tracker = Tracker::new(MemoryStore::new());
    tracker.create_task(NewTask::new("keep me")).await.unwrap();

    let missing = Uuid::new_v4();
    let err = tracker.delete_task(missing).await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(id) if id == missing));
    assert_eq!(tracker.board().tasks().len(), 1);
}

#[tokio::test]
async fn delete_task_removes_it_from_board_and_store() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let created = tracker.create_task(NewTask::new("goner")).await.unwrap();

    tracker.delete_task(created.id).await.unwrap();
    assert!(tracker.board().task(created.id).is_none());
    assert!(tracker.store().list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_store_update_leaves_board_record_unchanged() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let created = tracker.create_task(NewTask::new("stable")).await.unwrap();

    tracker.store().fail_next_request("backend down").await;
    let patch = TaskPatch {
        title: Some("never applied".to_string()),
        ..TaskPatch::default()
    };
    let err = tracker.update_task(created.id, patch).await.unwrap_err();
    assert!(matches!(err, TrackerError::Persistence(_)));
    assert_eq!(tracker.board().task(created.id).unwrap(), &created);
}

#[tokio::test]
async fn failed_store_create_leaves_board_unchanged() {
    let mut tracker = Tracker::new(MemoryStore::new());

    tracker.store().fail_next_request("backend down").await;
    let err = tracker.create_task(NewTask::new("lost")).await.unwrap_err();
    assert!(matches!(err, TrackerError::Persistence(_)));
    assert!(tracker.board().tasks().is_empty());
}

#[tokio::test]
async fn failed_store_delete_keeps_task_on_board() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let created = tracker.create_task(NewTask::new("survivor")).await.unwrap();

    tracker.store().fail_next_request("backend down").await;
    let err = tracker.delete_task(created.id).await.unwrap_err();
    assert!(matches!(err, TrackerError::Persistence(_)));
    assert!(tracker.board().task(created.id).is_some());
}

#[tokio::test]
async fn create_category_trims_name_and_uses_default_color() {
    let mut tracker = Tracker::new(MemoryStore::new());

    let category = tracker.create_category("  Errands  ").await.unwrap();
    assert_eq!(category.name, "Errands");
    assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
    assert_eq!(tracker.board().categories().len(), 1);
}

#[tokio::test]
async fn create_category_rejects_whitespace_name() {
    let mut tracker = Tracker::new(MemoryStore::new());

    let err = tracker.create_category(" \t ").await.unwrap_err();
    assert!(matches!(
        err,
        TrackerError::Validation(ValidationError::EmptyCategoryName)
    ));
    assert!(tracker.board().categories().is_empty());
}

#[tokio::test]
async fn tasks_can_be_assigned_to_existing_categories() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let category = tracker.create_category("Work").await.unwrap();

    let mut input = NewTask::new("assigned");
    input.category = Some(category.id);
    let created = tracker.create_task(input).await.unwrap();
    assert_eq!(created.category, Some(category.id));
}

#[tokio::test]
async fn refresh_replaces_board_with_store_snapshot() {
    let mut tracker = Tracker::new(MemoryStore::new());
    tracker.create_category("Home").await.unwrap();
    tracker.create_task(NewTask::new("first")).await.unwrap();
    tracker.create_task(NewTask::new("second")).await.unwrap();

    let before = tracker.board().clone();
    tracker.refresh().await.unwrap();
    assert_eq!(tracker.board(), &before);

    // A refresh after an out-of-band store write picks up the new record.
    tracker
        .store()
        .create_task(taskflow_core::TaskFields {
            title: "out of band".to_string(),
            category: None,
            priority: Priority::Medium,
            due_date: None,
            completed: false,
            created_at: chrono::Utc::now(),
            completed_at: None,
        })
        .await
        .unwrap();
    tracker.refresh().await.unwrap();
    assert_eq!(tracker.board().tasks().len(), 3);
    assert_eq!(tracker.board().tasks()[0].title, "out of band");
}
