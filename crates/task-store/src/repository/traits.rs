//! Repository Layer - Core Traits
//!
//! Row-level access to the task tables and the auth service.
//! Implementations: the REST backend and an in-memory backend.
//!
//! Futures are not `Send`: in the browser everything runs on one thread.

use async_trait::async_trait;

use crate::domain::{Credentials, Session, StoreResult, TaskId};
use super::rows::{NewTaskListRow, NewTaskRow, TaskPatch, TaskRow};

/// Table operations against `tasks` and `task_lists`
///
/// Every call is made on behalf of `session`; owner scoping is the store's job.
#[async_trait(?Send)]
pub trait TaskStore {
    /// Owner's tasks with embedded list rows, newest first
    async fn select_tasks(&self, session: &Session) -> StoreResult<Vec<TaskRow>>;

    /// Insert one task row and return it as stored
    async fn insert_task(&self, session: &Session, row: &NewTaskRow<'_>) -> StoreResult<TaskRow>;

    async fn update_task(&self, session: &Session, id: &TaskId, patch: &TaskPatch) -> StoreResult<()>;

    /// List rows go with the task through the store's cascade
    async fn delete_task(&self, session: &Session, id: &TaskId) -> StoreResult<()>;

    async fn insert_lists(&self, session: &Session, rows: &[NewTaskListRow<'_>]) -> StoreResult<()>;

    /// Remove every list row of a task
    async fn delete_lists(&self, session: &Session, task_id: &TaskId) -> StoreResult<()>;
}

/// Session lifecycle against the auth service
#[async_trait(?Send)]
pub trait AuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> StoreResult<Session>;

    /// `None` when the account needs email confirmation before it can sign in
    async fn sign_up(&self, credentials: &Credentials) -> StoreResult<Option<Session>>;

    /// Exchange a refresh token for a fresh session
    async fn refresh(&self, refresh_token: &str) -> StoreResult<Session>;

    async fn sign_out(&self, session: &Session) -> StoreResult<()>;
}
