use taskflow_core::{
    board_summary, filtered_tasks, CategoryFilter, CategoryStore, MemoryStore, NewTask, Priority,
    PriorityFilter, SortKey, TaskView, Tracker,
};

async fn tracker_with_tasks(specs: &[(&str, Priority, Option<&str>)]) -> Tracker<MemoryStore> {
    let mut tracker = Tracker::new(MemoryStore::new());
    // Creation inserts at the front, so feed specs in reverse to make board
    // order match the slice order.
    for (title, priority, due) in specs.iter().rev() {
        let mut input = NewTask::new(*title);
        input.priority = *priority;
        input.due_date = due.map(|d| d.parse().unwrap());
        tracker.create_task(input).await.unwrap();
    }
    tracker
}

#[tokio::test]
async fn due_date_sort_orders_dated_tasks_then_undated() {
    let tracker = tracker_with_tasks(&[
        ("june third", Priority::Medium, Some("2024-06-03")),
        ("june first", Priority::Medium, Some("2024-06-01")),
        ("undated", Priority::Medium, None),
        ("june second", Priority::Medium, Some("2024-06-02")),
    ])
    .await;

    let titles: Vec<String> = filtered_tasks(tracker.board(), &TaskView::default())
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(
        titles,
        ["june first", "june second", "june third", "undated"]
    );
}

#[tokio::test]
async fn priority_sort_keeps_relative_order_of_equal_priorities() {
    let tracker = tracker_with_tasks(&[
        ("low", Priority::Low, None),
        ("high one", Priority::High, None),
        ("medium", Priority::Medium, None),
        ("high two", Priority::High, None),
    ])
    .await;

    let view = TaskView {
        sort: SortKey::Priority,
        ..TaskView::default()
    };
    let titles: Vec<String> = filtered_tasks(tracker.board(), &view)
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, ["low", "medium", "high one", "high two"]);
}

#[tokio::test]
async fn priority_filter_keeps_only_matching_tasks() {
    let tracker = tracker_with_tasks(&[
        ("urgent", Priority::High, None),
        ("relaxed", Priority::Low, None),
    ])
    .await;

    let view = TaskView {
        priority: PriorityFilter::Only(Priority::High),
        ..TaskView::default()
    };
    let tasks = filtered_tasks(tracker.board(), &view);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "urgent");
}

#[tokio::test]
async fn combined_filters_all_must_pass() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let work = tracker.create_category("Work").await.unwrap();

    let mut report = NewTask::new("Quarterly report");
    report.category = Some(work.id);
    report.priority = Priority::High;
    let report = tracker.create_task(report).await.unwrap();

    let mut other = NewTask::new("Quarterly taxes");
    other.priority = Priority::High;
    tracker.create_task(other).await.unwrap();

    let view = TaskView {
        category: CategoryFilter::Only(work.id),
        search: "quarterly".to_string(),
        priority: PriorityFilter::Only(Priority::High),
        ..TaskView::default()
    };
    let tasks = filtered_tasks(tracker.board(), &view);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, report.id);
}

#[tokio::test]
async fn reapplying_the_same_view_yields_identical_sequences() {
    let tracker = tracker_with_tasks(&[
        ("a", Priority::High, Some("2024-06-02")),
        ("b", Priority::Low, None),
        ("c", Priority::Medium, Some("2024-06-01")),
    ])
    .await;

    let view = TaskView {
        sort: SortKey::Priority,
        ..TaskView::default()
    };
    let first = filtered_tasks(tracker.board(), &view);
    let second = filtered_tasks(tracker.board(), &view);
    assert_eq!(first, second);
}

#[tokio::test]
async fn summary_spans_unfiltered_board() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let cat_a = tracker.create_category("A").await.unwrap();
    let cat_b = tracker.create_category("B").await.unwrap();

    // catA: 3 tasks, 1 completed. catB: 2 tasks, 2 completed.
    let mut completed_ids = Vec::new();
    for (index, category) in [(0, cat_a.id), (1, cat_a.id), (2, cat_a.id)] {
        let mut input = NewTask::new(format!("a{index}"));
        input.category = Some(category);
        let task = tracker.create_task(input).await.unwrap();
        if index == 0 {
            completed_ids.push(task.id);
        }
    }
    for index in 0..2 {
        let mut input = NewTask::new(format!("b{index}"));
        input.category = Some(cat_b.id);
        let task = tracker.create_task(input).await.unwrap();
        completed_ids.push(task.id);
    }
    for id in completed_ids {
        tracker.toggle_complete(id).await.unwrap();
    }

    let summary = board_summary(tracker.board());
    assert_eq!(summary.all.task_count, 5);
    assert_eq!(summary.all.completed_count, 3);

    let tally_a = summary
        .per_category
        .iter()
        .find(|(id, _)| *id == cat_a.id)
        .map(|(_, tally)| *tally)
        .unwrap();
    assert_eq!(tally_a.task_count, 3);
    assert_eq!(tally_a.completed_count, 1);

    let tally_b = summary
        .per_category
        .iter()
        .find(|(id, _)| *id == cat_b.id)
        .map(|(_, tally)| *tally)
        .unwrap();
    assert_eq!(tally_b.task_count, 2);
    assert_eq!(tally_b.completed_count, 2);
}

#[tokio::test]
async fn summary_ignores_view_filters() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let done = tracker.create_task(NewTask::new("done")).await.unwrap();
    tracker.create_task(NewTask::new("open")).await.unwrap();
    tracker.toggle_complete(done.id).await.unwrap();

    // Hiding completed tasks changes the view, never the tallies.
    let view = TaskView {
        show_completed: false,
        ..TaskView::default()
    };
    assert_eq!(filtered_tasks(tracker.board(), &view).len(), 1);

    let summary = board_summary(tracker.board());
    assert_eq!(summary.all.task_count, 2);
    assert_eq!(summary.all.completed_count, 1);
}

#[tokio::test]
async fn dangling_category_reference_survives_and_counts_under_all() {
    let mut tracker = Tracker::new(MemoryStore::new());
    let category = tracker.create_category("Transient").await.unwrap();

    let mut input = NewTask::new("left behind");
    input.category = Some(category.id);
    let task = tracker.create_task(input).await.unwrap();

    // The category disappears from the store while the task still
    // references it; the reference dangles instead of cascading.
    tracker.store().delete_category(category.id).await.unwrap();
    tracker.refresh().await.unwrap();

    let on_board = tracker.board().task(task.id).unwrap();
    assert_eq!(on_board.category, Some(category.id));
    assert!(tracker.board().category(category.id).is_none());

    let summary = board_summary(tracker.board());
    assert_eq!(summary.all.task_count, 1);
    assert!(summary.per_category.is_empty());
}
