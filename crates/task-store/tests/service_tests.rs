//! Integration tests for TaskService.
//!
//! Runs every board operation against MemoryStore.

use chrono::NaiveDate;
use task_store::{
    AuthProvider, Credentials, MemoryStore, Session, StoreError, StoreOp, Task, TaskDraft,
    TaskId, TaskInput, TaskService,
};

async fn setup() -> (TaskService<MemoryStore>, Session) {
    let store = MemoryStore::new();
    store.add_account("ada@example.com", "hunter2").unwrap();
    let session = store
        .sign_in(&Credentials::new("ada@example.com", "hunter2"))
        .await
        .unwrap();
    (TaskService::new(store), session)
}

fn input(title: &str, is_complete: bool, lists: &[&str]) -> TaskInput {
    TaskInput::new(
        title,
        is_complete,
        NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
        lists.iter().copied(),
    )
}

fn list_texts(task: &Task) -> Vec<&str> {
    task.lists.iter().map(|l| l.text.as_str()).collect()
}

fn find<'a>(tasks: &'a [Task], id: &TaskId) -> Option<&'a Task> {
    tasks.iter().find(|t| &t.id == id)
}

// =============================================================================
// CREATE
// =============================================================================

#[tokio::test]
async fn test_create_discards_blank_lists() {
    let (service, session) = setup().await;

    let tasks = service
        .create(&session, &input("Shopping", false, &["a", "", "b"]))
        .await
        .unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(list_texts(&tasks[0]), ["a", "b"]);
    assert_eq!(service.store().list_count(), 2);
}

#[tokio::test]
async fn test_create_from_draft() {
    let (service, session) = setup().await;

    let mut draft = TaskDraft::new();
    draft.title = "Renew passport".into();
    draft.deadline = "2025-11-02".into();
    let key = draft.lists()[0].key;
    draft.set_list_text(key, "photos");
    draft.add_list();

    let tasks = service.create(&session, &draft.submit().unwrap()).await.unwrap();
    assert_eq!(tasks[0].title, "Renew passport");
    assert_eq!(tasks[0].deadline, NaiveDate::from_ymd_opt(2025, 11, 2).unwrap());
    assert_eq!(list_texts(&tasks[0]), ["photos"]);
}

#[tokio::test]
async fn test_create_without_lists() {
    let (service, session) = setup().await;
    let tasks = service.create(&session, &input("Solo", true, &[])).await.unwrap();
    assert!(tasks[0].lists.is_empty());
    assert!(tasks[0].is_complete);
}

#[tokio::test]
async fn test_create_keeps_task_when_lists_fail() {
    let (service, session) = setup().await;
    service.store().fail_next(StoreOp::InsertLists);

    let result = service.create(&session, &input("Half written", false, &["x"])).await;
    assert!(matches!(result, Err(StoreError::Rejected { status: 503, .. })));

    // No rollback: the task row is there without its lists
    let tasks = service.list(&session).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].lists.is_empty());
}

#[tokio::test]
async fn test_create_skips_lists_when_task_insert_fails() {
    let (service, session) = setup().await;
    service.store().fail_next(StoreOp::InsertTask);

    assert!(service.create(&session, &input("Nope", false, &["x"])).await.is_err());
    assert_eq!(service.store().task_count(), 0);
    assert_eq!(service.store().list_count(), 0);
}

// =============================================================================
// LIST
// =============================================================================

#[tokio::test]
async fn test_list_newest_first_and_owner_only() {
    let (service, ada) = setup().await;
    service.store().add_account("bob@example.com", "pw").unwrap();
    let bob = service
        .store()
        .sign_in(&Credentials::new("bob@example.com", "pw"))
        .await
        .unwrap();

    service.create(&ada, &input("older", false, &[])).await.unwrap();
    service.create(&bob, &input("bob's", false, &[])).await.unwrap();
    let tasks = service.create(&ada, &input("newer", false, &[])).await.unwrap();

    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["newer", "older"]);
}

#[tokio::test]
async fn test_list_error_is_returned() {
    let (service, session) = setup().await;
    service.store().fail_next(StoreOp::SelectTasks);
    assert!(service.list(&session).await.is_err());
}

// =============================================================================
// UPDATE
// =============================================================================

#[tokio::test]
async fn test_update_replaces_lists() {
    let (service, session) = setup().await;
    let tasks = service.create(&session, &input("Trip", false, &["a", "b"])).await.unwrap();
    let id = tasks[0].id.clone();

    let tasks = service
        .update(&session, &id, &input("Trip (booked)", true, &["c"]))
        .await
        .unwrap();

    let task = find(&tasks, &id).expect("task still present");
    assert_eq!(task.title, "Trip (booked)");
    assert!(task.is_complete);
    assert_eq!(list_texts(task), ["c"]);
    assert_eq!(service.store().list_count(), 1);
}

#[tokio::test]
async fn test_update_to_no_lists() {
    let (service, session) = setup().await;
    let tasks = service.create(&session, &input("t", false, &["a"])).await.unwrap();
    let id = tasks[0].id.clone();

    let tasks = service.update(&session, &id, &input("t", false, &["", " "])).await.unwrap();
    assert!(find(&tasks, &id).unwrap().lists.is_empty());
}

#[tokio::test]
async fn test_update_stops_after_failed_delete() {
    let (service, session) = setup().await;
    let tasks = service.create(&session, &input("t", false, &["keep"])).await.unwrap();
    let id = tasks[0].id.clone();

    service.store().fail_next(StoreOp::DeleteLists);
    assert!(service.update(&session, &id, &input("renamed", false, &["new"])).await.is_err());

    // Scalar write landed, list rows untouched
    let tasks = service.list(&session).await.unwrap();
    let task = find(&tasks, &id).unwrap();
    assert_eq!(task.title, "renamed");
    assert_eq!(list_texts(task), ["keep"]);
}

// =============================================================================
// DELETE / TOGGLE
// =============================================================================

#[tokio::test]
async fn test_delete_removes_from_next_fetch() {
    let (service, session) = setup().await;
    service.create(&session, &input("stay", false, &[])).await.unwrap();
    let tasks = service.create(&session, &input("go", false, &["x"])).await.unwrap();
    let id = tasks.iter().find(|t| t.title == "go").unwrap().id.clone();

    let tasks = service.delete(&session, &id).await.unwrap();
    assert!(find(&tasks, &id).is_none());
    assert_eq!(tasks.len(), 1);
    assert_eq!(service.store().list_count(), 0);
}

#[tokio::test]
async fn test_failed_delete_keeps_task() {
    let (service, session) = setup().await;
    let tasks = service.create(&session, &input("keep me", false, &["x"])).await.unwrap();
    let id = tasks[0].id.clone();

    service.store().fail_next(StoreOp::DeleteTask);
    assert!(service.delete(&session, &id).await.is_err());

    let tasks = service.list(&session).await.unwrap();
    assert_eq!(list_texts(find(&tasks, &id).expect("task survives")), ["x"]);
}

#[tokio::test]
async fn test_toggle_twice_restores_flag() {
    let (service, session) = setup().await;
    let tasks = service.create(&session, &input("flip", false, &[])).await.unwrap();
    let id = tasks[0].id.clone();

    let tasks = service
        .toggle_complete(&session, &tasks, &id)
        .await
        .unwrap()
        .expect("task is known");
    assert!(find(&tasks, &id).unwrap().is_complete);

    let tasks = service
        .toggle_complete(&session, &tasks, &id)
        .await
        .unwrap()
        .expect("task is known");
    assert!(!find(&tasks, &id).unwrap().is_complete);
}

#[tokio::test]
async fn test_toggle_unknown_task_writes_nothing() {
    let (service, session) = setup().await;
    let tasks = service.create(&session, &input("t", false, &[])).await.unwrap();

    let outcome = service
        .toggle_complete(&session, &tasks, &TaskId::from("missing"))
        .await
        .unwrap();
    assert!(outcome.is_none());
    assert!(!service.list(&session).await.unwrap()[0].is_complete);
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let (service, session) = setup().await;
    service.store().sign_out(&session).await.unwrap();

    let err = service.create(&session, &input("late", false, &[])).await.unwrap_err();
    assert!(err.is_auth_failure());
    assert_eq!(service.store().task_count(), 0);
}
