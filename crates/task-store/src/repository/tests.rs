//! Repository Integration Tests
//!
//! Tests for MemoryStore at the row level.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::{Credentials, Session, StoreError, TaskId, TaskInput};
    use crate::repository::{
        list_rows, AuthProvider, MemoryStore, NewTaskRow, StoreOp, TaskPatch, TaskStore,
    };

    async fn setup_store() -> (MemoryStore, Session) {
        let store = MemoryStore::new();
        store.add_account("ada@example.com", "hunter2").expect("Failed to add account");
        let session = store
            .sign_in(&Credentials::new("ada@example.com", "hunter2"))
            .await
            .expect("Failed to sign in");
        (store, session)
    }

    fn input(title: &str, lists: &[&str]) -> TaskInput {
        TaskInput::new(title, false, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), lists.iter().copied())
    }

    #[tokio::test]
    async fn test_insert_and_select() {
        let (store, session) = setup_store().await;

        let task = input("Write report", &["outline", "draft"]);
        let row = store
            .insert_task(&session, &NewTaskRow::from_input(&task, session.user_id()))
            .await
            .expect("Failed to insert");
        let id = TaskId::new(row.id.clone());
        store.insert_lists(&session, &list_rows(&id, &task)).await.expect("Failed to insert lists");

        let rows = store.select_tasks(&session).await.expect("Select failed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Write report");
        assert!(rows[0].created_at.is_some());
        let texts: Vec<&str> = rows[0].task_lists.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["outline", "draft"]);
    }

    #[tokio::test]
    async fn test_select_newest_first() {
        let (store, session) = setup_store().await;
        for title in ["first", "second", "third"] {
            let task = input(title, &[]);
            store
                .insert_task(&session, &NewTaskRow::from_input(&task, session.user_id()))
                .await
                .unwrap();
        }

        let titles: Vec<String> = store
            .select_tasks(&session)
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.title)
            .collect();
        assert_eq!(titles, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_owner_scoping() {
        let (store, ada) = setup_store().await;
        store.add_account("bob@example.com", "pw").unwrap();
        let bob = store.sign_in(&Credentials::new("bob@example.com", "pw")).await.unwrap();

        let task = input("Ada's task", &[]);
        let row = store
            .insert_task(&ada, &NewTaskRow::from_input(&task, ada.user_id()))
            .await
            .unwrap();

        assert!(store.select_tasks(&bob).await.unwrap().is_empty());

        // Bob cannot touch Ada's rows
        let id = TaskId::new(row.id);
        store.delete_task(&bob, &id).await.unwrap();
        store.update_task(&bob, &id, &TaskPatch::completion(true)).await.unwrap();
        let rows = store.select_tasks(&ada).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_complete);

        // Nor insert rows claiming to be Ada
        let err = store
            .insert_task(&bob, &NewTaskRow::from_input(&task, ada.user_id()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades_lists() {
        let (store, session) = setup_store().await;
        let task = input("t", &["a", "b"]);
        let row = store
            .insert_task(&session, &NewTaskRow::from_input(&task, session.user_id()))
            .await
            .unwrap();
        let id = TaskId::new(row.id);
        store.insert_lists(&session, &list_rows(&id, &task)).await.unwrap();
        assert_eq!(store.list_count(), 2);

        store.delete_task(&session, &id).await.expect("Delete failed");
        assert_eq!(store.task_count(), 0);
        assert_eq!(store.list_count(), 0);
    }

    #[tokio::test]
    async fn test_insert_lists_checks_foreign_key() {
        let (store, session) = setup_store().await;
        let task = input("t", &["orphan"]);
        let missing = TaskId::from("task-404");
        let err = store.insert_lists(&session, &list_rows(&missing, &task)).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 409, .. }));
        assert_eq!(store.list_count(), 0);
    }

    #[tokio::test]
    async fn test_injected_failure_fires_once() {
        let (store, session) = setup_store().await;
        store.fail_next(StoreOp::SelectTasks);
        assert!(store.select_tasks(&session).await.is_err());
        assert!(store.select_tasks(&session).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let (store, mut session) = setup_store().await;
        session.access_token = "forged".into();
        let err = store.select_tasks(&session).await.unwrap_err();
        assert!(err.is_auth_failure());
    }

    #[tokio::test]
    async fn test_auth_lifecycle() {
        let store = MemoryStore::new();
        let credentials = Credentials::new("new@example.com", "secret");

        let session = store.sign_up(&credentials).await.unwrap().expect("Auto-confirmed session");
        assert!(store.sign_up(&credentials).await.is_err());

        let wrong = store.sign_in(&Credentials::new("new@example.com", "nope")).await.unwrap_err();
        assert_eq!(wrong, StoreError::Rejected { status: 400, message: "Invalid login credentials".into() });

        let refreshed = store.refresh(&session.refresh_token).await.expect("Refresh failed");
        assert_eq!(refreshed.user, session.user);
        assert_ne!(refreshed.access_token, session.access_token);
        // Refresh tokens are single use
        assert!(store.refresh(&session.refresh_token).await.is_err());

        store.sign_out(&refreshed).await.expect("Sign out failed");
        assert!(store.select_tasks(&refreshed).await.unwrap_err().is_auth_failure());
    }
}
