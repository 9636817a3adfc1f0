//! In-Memory Store
//!
//! Behaves like the hosted store closely enough to test the data-access
//! layer: owner scoping, list-row cascade on task delete, foreign-key checks
//! and store-assigned ids/timestamps. Failures can be injected per operation.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::domain::{Credentials, Session, StoreError, StoreResult, TaskId, User};
use super::rows::{NewTaskListRow, NewTaskRow, TaskListRow, TaskPatch, TaskRow};
use super::traits::{AuthProvider, TaskStore};

/// 2025-01-01T00:00:00Z; row timestamps count up from here, one second per id
const CLOCK_BASE: i64 = 1_735_689_600;

/// Operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    SelectTasks,
    InsertTask,
    UpdateTask,
    DeleteTask,
    InsertLists,
    DeleteLists,
}

#[derive(Debug, Clone)]
struct StoredTask {
    id: String,
    user_id: String,
    title: String,
    is_complete: bool,
    deadline: NaiveDate,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct StoredList {
    id: String,
    task_id: String,
    text: String,
    position: i32,
}

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    accounts: Vec<Account>,
    /// access token -> user id
    access_tokens: HashMap<String, String>,
    /// refresh token -> user id
    refresh_tokens: HashMap<String, String>,
    tasks: Vec<StoredTask>,
    lists: Vec<StoredList>,
    pending_failures: HashSet<StoreOp>,
    next_id: u64,
}

impl MemoryState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn take_failure(&mut self, op: StoreOp) -> StoreResult<()> {
        if self.pending_failures.remove(&op) {
            return Err(StoreError::Rejected {
                status: 503,
                message: format!("injected failure: {:?}", op),
            });
        }
        Ok(())
    }

    /// Resolve the session to its user id the way the store checks a JWT
    fn owner(&self, session: &Session) -> StoreResult<String> {
        match self.access_tokens.get(&session.access_token) {
            Some(user_id) if *user_id == session.user.id => Ok(user_id.clone()),
            _ => Err(StoreError::Unauthorized("invalid or expired token".into())),
        }
    }

    fn owns_task(&self, owner: &str, task_id: &str) -> Option<bool> {
        self.tasks
            .iter()
            .find(|task| task.id == task_id)
            .map(|task| task.user_id == owner)
    }

    fn issue_session(&mut self, user: User) -> Session {
        let n = self.next_id();
        let access_token = format!("mem-access-{}", n);
        let refresh_token = format!("mem-refresh-{}", n);
        self.access_tokens.insert(access_token.clone(), user.id.clone());
        self.refresh_tokens.insert(refresh_token.clone(), user.id.clone());
        Session {
            access_token,
            refresh_token,
            expires_at: None,
            user,
        }
    }

    fn row(&self, task: &StoredTask) -> TaskRow {
        let mut task_lists: Vec<TaskListRow> = self
            .lists
            .iter()
            .filter(|list| list.task_id == task.id)
            .map(|list| TaskListRow {
                id: list.id.clone(),
                text: list.text.clone(),
                position: list.position,
            })
            .collect();
        task_lists.sort_by_key(|list| list.position);
        TaskRow {
            id: task.id.clone(),
            title: task.title.clone(),
            is_complete: task.is_complete,
            deadline: task.deadline,
            created_at: task.created_at,
            task_lists,
        }
    }
}

/// Store kept entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a confirmed account
    pub fn add_account(&self, email: &str, password: &str) -> StoreResult<User> {
        let mut state = self.lock()?;
        let user = User {
            id: format!("user-{}", state.next_id()),
            email: Some(email.to_string()),
        };
        state.accounts.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        Ok(user)
    }

    /// Make the next call of `op` fail with a 503
    pub fn fail_next(&self, op: StoreOp) {
        if let Ok(mut state) = self.lock() {
            state.pending_failures.insert(op);
        }
    }

    /// Task rows across all owners
    pub fn task_count(&self) -> usize {
        self.lock().map(|state| state.tasks.len()).unwrap_or(0)
    }

    /// List rows across all owners
    pub fn list_count(&self) -> usize {
        self.lock().map(|state| state.lists.len()).unwrap_or(0)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Transport("memory store lock poisoned".into()))
    }
}

#[async_trait(?Send)]
impl TaskStore for MemoryStore {
    async fn select_tasks(&self, session: &Session) -> StoreResult<Vec<TaskRow>> {
        let mut state = self.lock()?;
        state.take_failure(StoreOp::SelectTasks)?;
        let owner = state.owner(session)?;

        let mut owned: Vec<&StoredTask> = state.tasks.iter().filter(|task| task.user_id == owner).collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned.into_iter().map(|task| state.row(task)).collect())
    }

    async fn insert_task(&self, session: &Session, row: &NewTaskRow<'_>) -> StoreResult<TaskRow> {
        let mut state = self.lock()?;
        state.take_failure(StoreOp::InsertTask)?;
        let owner = state.owner(session)?;
        if row.user_id != owner {
            return Err(StoreError::Rejected {
                status: 403,
                message: "new row violates row-level security policy for table \"tasks\"".into(),
            });
        }

        let n = state.next_id();
        let task = StoredTask {
            id: format!("task-{}", n),
            user_id: owner,
            title: row.title.to_string(),
            is_complete: row.is_complete,
            deadline: row.deadline,
            created_at: Utc.timestamp_opt(CLOCK_BASE + n as i64, 0).single(),
        };
        let stored = state.row(&task);
        state.tasks.push(task);
        Ok(stored)
    }

    async fn update_task(&self, session: &Session, id: &TaskId, patch: &TaskPatch) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.take_failure(StoreOp::UpdateTask)?;
        let owner = state.owner(session)?;

        // Zero matched rows is not an error for a filtered update
        if let Some(task) = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id.as_str() && task.user_id == owner)
        {
            if let Some(title) = &patch.title {
                task.title = title.clone();
            }
            if let Some(is_complete) = patch.is_complete {
                task.is_complete = is_complete;
            }
            if let Some(deadline) = patch.deadline {
                task.deadline = deadline;
            }
        }
        Ok(())
    }

    async fn delete_task(&self, session: &Session, id: &TaskId) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.take_failure(StoreOp::DeleteTask)?;
        let owner = state.owner(session)?;

        if state.owns_task(&owner, id.as_str()) == Some(true) {
            state.tasks.retain(|task| task.id != id.as_str());
            // ON DELETE CASCADE
            state.lists.retain(|list| list.task_id != id.as_str());
        }
        Ok(())
    }

    async fn insert_lists(&self, session: &Session, rows: &[NewTaskListRow<'_>]) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.take_failure(StoreOp::InsertLists)?;
        let owner = state.owner(session)?;

        // Checked up front: a bulk insert is all-or-nothing
        for row in rows {
            match state.owns_task(&owner, row.task_id) {
                None => {
                    return Err(StoreError::Rejected {
                        status: 409,
                        message: "insert or update on table \"task_lists\" violates foreign key constraint".into(),
                    })
                }
                Some(false) => {
                    return Err(StoreError::Rejected {
                        status: 403,
                        message: "new row violates row-level security policy for table \"task_lists\"".into(),
                    })
                }
                Some(true) => {}
            }
        }

        for row in rows {
            let n = state.next_id();
            state.lists.push(StoredList {
                id: format!("list-{}", n),
                task_id: row.task_id.to_string(),
                text: row.text.to_string(),
                position: row.position,
            });
        }
        Ok(())
    }

    async fn delete_lists(&self, session: &Session, task_id: &TaskId) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.take_failure(StoreOp::DeleteLists)?;
        let owner = state.owner(session)?;

        if state.owns_task(&owner, task_id.as_str()) == Some(true) {
            state.lists.retain(|list| list.task_id != task_id.as_str());
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthProvider for MemoryStore {
    async fn sign_in(&self, credentials: &Credentials) -> StoreResult<Session> {
        let mut state = self.lock()?;
        let user = state
            .accounts
            .iter()
            .find(|account| {
                account.user.email.as_deref() == Some(credentials.email.as_str())
                    && account.password == credentials.password
            })
            .map(|account| account.user.clone())
            .ok_or_else(|| StoreError::Rejected {
                status: 400,
                message: "Invalid login credentials".into(),
            })?;
        Ok(state.issue_session(user))
    }

    async fn sign_up(&self, credentials: &Credentials) -> StoreResult<Option<Session>> {
        let exists = self
            .lock()?
            .accounts
            .iter()
            .any(|account| account.user.email.as_deref() == Some(credentials.email.as_str()));
        if exists {
            return Err(StoreError::Rejected {
                status: 422,
                message: "User already registered".into(),
            });
        }
        let user = self.add_account(&credentials.email, &credentials.password)?;
        Ok(Some(self.lock()?.issue_session(user)))
    }

    async fn refresh(&self, refresh_token: &str) -> StoreResult<Session> {
        let mut state = self.lock()?;
        let user_id = state
            .refresh_tokens
            .remove(refresh_token)
            .ok_or_else(|| StoreError::Rejected {
                status: 400,
                message: "Invalid Refresh Token".into(),
            })?;
        let user = state
            .accounts
            .iter()
            .find(|account| account.user.id == user_id)
            .map(|account| account.user.clone())
            .ok_or_else(|| StoreError::Unauthorized("user no longer exists".into()))?;
        Ok(state.issue_session(user))
    }

    async fn sign_out(&self, session: &Session) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.owner(session)?;
        state.access_tokens.remove(&session.access_token);
        state.refresh_tokens.remove(&session.refresh_token);
        Ok(())
    }
}
