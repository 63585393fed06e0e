//! Integration tests for the tasks page
//!
//! These drive a `TasksView` against a scripted store and check the requests
//! it issues, the order they go out in and the notifications that follow.

mod common;

use common::{filled_task_form, tag_row, task_row, Op, TestContext};
use greenvote::views::{LoadState, Submission, TasksView};
use greenvote_shared::db::Table;
use greenvote_shared::models::{RecordId, Tag, Task, TaskFields};
use greenvote_shared::notify::Notification;
use std::time::Duration;

async fn seeded() -> TestContext {
    let ctx = TestContext::new();
    ctx.store
        .tables()
        .seed(Table::Tasks, vec![task_row(1, "Sort seed library"), task_row(2, "Fix compost bin")])
        .await;
    ctx.store
        .tables()
        .seed(
            Table::Tags,
            vec![
                tag_row(1, 1, "gardening"),
                tag_row(2, 2, "volunteer"),
                tag_row(3, 2, "repairs"),
            ],
        )
        .await;
    ctx
}

async fn active_view(ctx: &TestContext) -> TasksView {
    let mut view = TasksView::new(&ctx.collaborators);
    view.activate().await;
    assert!(view.board().ready().is_some(), "board should load");
    view
}

#[tokio::test]
async fn test_loads_tasks_and_tags() {
    let ctx = seeded().await;
    let view = active_view(&ctx).await;

    let board = view.board().ready().unwrap();
    assert_eq!(board.tasks.len(), 2);
    assert_eq!(board.tags.len(), 3);
    assert_eq!(view.tag_vocabulary(), vec!["gardening", "volunteer", "repairs"]);
}

#[tokio::test]
async fn test_tasks_and_tags_load_concurrently() {
    let ctx = seeded().await;
    let gate = ctx.store.hold(Op::List);
    let mut view = TasksView::new(&ctx.collaborators);

    let release = async {
        // Both reads must be in flight before either is answered
        while ctx.store.calls().len() < 2 {
            tokio::task::yield_now().await;
        }
        gate.notify_waiters();
    };

    tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(view.activate(), release);
    })
    .await
    .expect("reads were issued one after another");

    let tables: Vec<Table> = ctx.store.calls().iter().map(|c| c.table).collect();
    assert!(tables.contains(&Table::Tasks));
    assert!(tables.contains(&Table::Tags));
    assert!(view.board().ready().is_some());
}

#[tokio::test]
async fn test_tag_load_failure_fails_whole_board() {
    let ctx = seeded().await;
    ctx.store.fail_next(Op::List, Table::Tags, "permission denied for table tags");

    let mut view = TasksView::new(&ctx.collaborators);
    view.activate().await;

    let err = view.board().error().expect("board should fail");
    assert_eq!(err.table, Table::Tags);
    assert_eq!(err.to_string(), "Failed to load tags: permission denied for table tags");
    assert!(view.tag_vocabulary().is_empty());
    assert!(ctx.toasts.snapshot().is_empty());
}

#[tokio::test]
async fn test_task_load_failure_is_reported_first() {
    let ctx = seeded().await;
    ctx.store.fail_next(Op::List, Table::Tasks, "tasks down");
    ctx.store.fail_next(Op::List, Table::Tags, "tags down");

    let mut view = TasksView::new(&ctx.collaborators);
    view.activate().await;

    assert!(matches!(view.board(), LoadState::Failed(e) if e.table == Table::Tasks));
}

#[tokio::test]
async fn test_create_without_tags_sends_one_insert() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;
    *view.create_form_mut() = filled_task_form("Weed the herb spiral");

    assert!(view.create_task().await.is_submitted());

    assert_eq!(ctx.store.inserted(Table::Tasks).len(), 1);
    assert!(ctx.store.inserted(Table::Tags).is_empty());
    assert_eq!(ctx.toasts.drain(), vec![Notification::success("Task created successfully!")]);
    assert!(view.create_form().is_empty());
}

#[tokio::test]
async fn test_rooftop_garden_task_with_two_tags() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;

    *view.create_form_mut() = filled_task_form("Water the rooftop garden");
    assert!(view.select_tag("gardening"));
    assert!(view.select_tag("volunteer"));

    assert!(view.create_task().await.is_submitted());

    // Task first, then each tag in selection order
    let inserts: Vec<Table> = ctx
        .store
        .calls()
        .iter()
        .filter(|c| c.op == Op::Insert)
        .map(|c| c.table)
        .collect();
    assert_eq!(inserts, vec![Table::Tasks, Table::Tags, Table::Tags]);

    let task_body = &ctx.store.inserted(Table::Tasks)[0];
    assert_eq!(task_body["title"], "Water the rooftop garden");
    assert_eq!(task_body["due_date"], "2024-09-01");
    assert_eq!(task_body["project_id"], "proj-42");

    let created = Task::list(ctx.store.tables())
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.title == "Water the rooftop garden")
        .expect("task stored");

    let tag_bodies = ctx.store.inserted(Table::Tags);
    assert_eq!(tag_bodies[0]["name"], "gardening");
    assert_eq!(tag_bodies[1]["name"], "volunteer");
    for body in &tag_bodies {
        assert_eq!(body["task_id"], created.task_id.as_str());
    }

    let attached = Tag::list_for_task(ctx.store.tables(), &created.task_id).await.unwrap();
    assert_eq!(attached.len(), 2);

    assert_eq!(ctx.toasts.drain(), vec![Notification::success("Task created successfully!")]);
    assert!(view.create_form().is_empty());
    assert_eq!(
        view.board().ready().map(|b| b.tasks.len()),
        Some(2),
        "loaded list is left alone"
    );
}

#[tokio::test]
async fn test_failed_tag_insert_keeps_earlier_ones() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;

    *view.create_form_mut() = filled_task_form("Build bee hotel");
    for name in ["gardening", "volunteer", "repairs"] {
        assert!(view.select_tag(name));
    }
    ctx.store.fail_after(Op::Insert, Table::Tags, 1, "duplicate key value");

    let outcome = view.create_task().await;

    assert!(matches!(outcome, Submission::Failed(ref e) if e.message() == "duplicate key value"));

    // Task and the first tag persist; the third is never attempted
    assert_eq!(ctx.store.inserted(Table::Tags).len(), 2);
    let created = Task::list(ctx.store.tables())
        .await
        .unwrap()
        .into_iter()
        .find(|t| t.title == "Build bee hotel")
        .expect("task stored");
    let attached = Tag::list_for_task(ctx.store.tables(), &created.task_id).await.unwrap();
    assert_eq!(attached.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["gardening"]);

    assert_eq!(
        ctx.toasts.drain(),
        vec![Notification::failure("Failed to create task: duplicate key value")]
    );
    assert_eq!(view.create_form().title, "Build bee hotel");
    assert_eq!(view.create_form().tags(), ["gardening", "volunteer", "repairs"]);
}

#[tokio::test]
async fn test_failed_task_insert_sends_no_tags() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;

    *view.create_form_mut() = filled_task_form("Paint planters");
    view.select_tag("gardening");
    ctx.store.fail_next(Op::Insert, Table::Tasks, "null value in column");

    assert!(matches!(view.create_task().await, Submission::Failed(_)));
    assert!(ctx.store.inserted(Table::Tags).is_empty());
    assert_eq!(
        ctx.toasts.drain(),
        vec![Notification::failure("Failed to create task: null value in column")]
    );
}

#[tokio::test]
async fn test_invalid_create_form_sends_nothing() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;
    let before = ctx.store.calls().len();

    let mut form = filled_task_form("Paint planters");
    form.due_date = "next week".to_string();
    *view.create_form_mut() = form;

    assert!(matches!(view.create_task().await, Submission::Invalid(_)));
    assert_eq!(ctx.store.calls().len(), before);
    assert!(ctx.toasts.snapshot().is_empty());
}

fn edited_fields() -> TaskFields {
    TaskFields {
        title: "Fix compost bin".to_string(),
        description: "Replace the hinge".to_string(),
        status: "in progress".to_string(),
        priority: "high".to_string(),
        due_date: "2024-09-15".to_string(),
        project_id: "proj-42".to_string(),
    }
}

#[tokio::test]
async fn test_busy_while_update_in_flight() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;
    let gate = ctx.store.hold(Op::Update);
    let mut busy = view.busy_watch();
    assert!(!*busy.borrow());

    let task_id = RecordId::new("2");
    let fields = edited_fields();
    let (outcome, seen_busy) = tokio::join!(view.update_task(&task_id, &fields), async {
        busy.changed().await.unwrap();
        let during = *busy.borrow_and_update();
        gate.notify_one();
        during
    });

    assert!(seen_busy);
    assert!(outcome.is_submitted());
    assert!(!view.is_busy());
    assert!(!*busy.borrow());
    assert_eq!(ctx.toasts.drain(), vec![Notification::success("Task updated successfully!")]);

    let stored = Task::list(ctx.store.tables()).await.unwrap();
    let updated = stored.iter().find(|t| t.task_id == task_id).unwrap();
    assert_eq!(updated.status, "in progress");
    assert_eq!(updated.description, "Replace the hinge");
}

#[tokio::test]
async fn test_busy_cleared_after_failed_update() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;
    let gate = ctx.store.hold(Op::Update);
    ctx.store.fail_next(Op::Update, Table::Tasks, "row-level security");
    let mut busy = view.busy_watch();

    let task_id = RecordId::new("2");
    let fields = edited_fields();
    let (outcome, seen_busy) = tokio::join!(view.update_task(&task_id, &fields), async {
        busy.changed().await.unwrap();
        let during = *busy.borrow_and_update();
        gate.notify_one();
        during
    });

    assert!(seen_busy);
    assert!(matches!(outcome, Submission::Failed(_)));
    assert!(!view.is_busy());
    assert_eq!(
        ctx.toasts.drain(),
        vec![Notification::failure("Failed to update task: row-level security")]
    );
}

#[tokio::test]
async fn test_update_sends_every_field() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;

    view.update_task(&RecordId::new("1"), &edited_fields()).await;

    let body = ctx
        .store
        .calls()
        .into_iter()
        .find(|c| c.op == Op::Update)
        .and_then(|c| c.body)
        .unwrap();
    for column in ["title", "description", "status", "priority", "due_date", "project_id"] {
        assert!(body.get(column).is_some(), "{} missing from update", column);
    }
}

#[tokio::test]
async fn test_edit_keeps_selection_open() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;

    assert!(view.select_task(&RecordId::new("2")));
    view.edit_form_mut().priority = "urgent".to_string();

    assert_eq!(view.submit_edit().await, Some(Submission::Submitted));
    assert_eq!(view.selected_task().map(|t| t.task_id.as_str()), Some("2"));
    assert_eq!(view.edit_form().priority, "urgent");
}

#[tokio::test]
async fn test_delete_then_refresh_drops_task() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;
    let task_id = RecordId::new("1");

    assert!(view.delete_task(&task_id).await.is_submitted());
    assert_eq!(ctx.toasts.drain(), vec![Notification::success("Task deleted successfully!")]);

    // Loaded list is untouched until refreshed
    assert_eq!(view.board().ready().map(|b| b.tasks.len()), Some(2));

    view.refresh().await;
    let board = view.board().ready().unwrap();
    assert!(board.tasks.iter().all(|t| t.task_id != task_id));
    assert_eq!(board.tasks.len(), 1);
}

#[tokio::test]
async fn test_failed_delete_notifies() {
    let ctx = seeded().await;
    let mut view = active_view(&ctx).await;
    ctx.store.fail_next(Op::Delete, Table::Tasks, "foreign key violation");

    assert!(matches!(view.delete_task(&RecordId::new("1")).await, Submission::Failed(_)));
    assert_eq!(
        ctx.toasts.drain(),
        vec![Notification::failure("Failed to delete task: foreign key violation")]
    );
}
