//! Task Service
//!
//! The data-access operations the board performs. Each mutation sequences its
//! dependent writes and then re-fetches the whole collection.
//!
//! Multi-step writes are not transactional: if a later step fails, earlier
//! steps stay written and the error is returned as-is.

use crate::domain::{Session, StoreResult, Task, TaskId, TaskInput};
use crate::repository::{list_rows, NewTaskRow, TaskPatch, TaskStore};

#[derive(Debug, Clone)]
pub struct TaskService<S> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Owner's tasks, newest first, with list items in order
    pub async fn list(&self, session: &Session) -> StoreResult<Vec<Task>> {
        let rows = self.store.select_tasks(session).await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    /// Insert the task row, then its list rows
    pub async fn create(&self, session: &Session, input: &TaskInput) -> StoreResult<Vec<Task>> {
        let row = self
            .store
            .insert_task(session, &NewTaskRow::from_input(input, session.user_id()))
            .await?;
        let id = TaskId::new(row.id);
        self.store.insert_lists(session, &list_rows(&id, input)).await?;
        log::info!("Created task {} with {} list items", id, input.lists().len());
        self.list(session).await
    }

    /// Replace scalar fields, then drop and re-insert every list row
    pub async fn update(&self, session: &Session, id: &TaskId, input: &TaskInput) -> StoreResult<Vec<Task>> {
        self.store.update_task(session, id, &TaskPatch::from_input(input)).await?;
        self.store.delete_lists(session, id).await?;
        self.store.insert_lists(session, &list_rows(id, input)).await?;
        log::info!("Updated task {}", id);
        self.list(session).await
    }

    pub async fn delete(&self, session: &Session, id: &TaskId) -> StoreResult<Vec<Task>> {
        self.store.delete_task(session, id).await?;
        log::info!("Deleted task {}", id);
        self.list(session).await
    }

    /// Flip the completion flag of `id` as currently shown in `tasks`
    ///
    /// Returns `Ok(None)` without writing when `id` is not in `tasks`.
    pub async fn toggle_complete(
        &self,
        session: &Session,
        tasks: &[Task],
        id: &TaskId,
    ) -> StoreResult<Option<Vec<Task>>> {
        let Some(task) = tasks.iter().find(|task| &task.id == id) else {
            log::warn!("Toggle requested for unknown task {}", id);
            return Ok(None);
        };
        self.store
            .update_task(session, id, &TaskPatch::completion(!task.is_complete))
            .await?;
        self.list(session).await.map(Some)
    }
}
