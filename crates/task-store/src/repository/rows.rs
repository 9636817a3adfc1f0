//! Row Shapes
//!
//! Column-level shapes of the `tasks` and `task_lists` tables and their
//! mapping into the view model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Task, TaskId, TaskInput, TaskListItem};

pub const TASKS_TABLE: &str = "tasks";
pub const TASK_LISTS_TABLE: &str = "task_lists";

/// Columns requested when reading tasks back, with list items embedded
pub const TASK_SELECT: &str = "id,title,is_complete,deadline,created_at,task_lists(id,text,position)";

/// A `tasks` row as returned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub is_complete: bool,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub task_lists: Vec<TaskListRow>,
}

/// A `task_lists` row as returned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListRow {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub position: i32,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        let mut lists = row.task_lists;
        // Stable, so rows sharing a position keep the store's order
        lists.sort_by_key(|list| list.position);
        Task {
            id: TaskId::new(row.id),
            title: row.title,
            is_complete: row.is_complete,
            deadline: row.deadline,
            lists: lists
                .into_iter()
                .map(|list| TaskListItem { id: list.id, text: list.text })
                .collect(),
            created_at: row.created_at,
        }
    }
}

/// Insert payload for `tasks`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaskRow<'a> {
    pub title: &'a str,
    pub is_complete: bool,
    pub deadline: NaiveDate,
    pub user_id: &'a str,
}

impl<'a> NewTaskRow<'a> {
    pub fn from_input(input: &'a TaskInput, user_id: &'a str) -> Self {
        Self {
            title: &input.title,
            is_complete: input.is_complete,
            deadline: input.deadline,
            user_id,
        }
    }
}

/// Partial update for `tasks`; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl TaskPatch {
    /// All scalar fields of an edited task
    pub fn from_input(input: &TaskInput) -> Self {
        Self {
            title: Some(input.title.clone()),
            is_complete: Some(input.is_complete),
            deadline: Some(input.deadline),
        }
    }

    pub fn completion(is_complete: bool) -> Self {
        Self {
            is_complete: Some(is_complete),
            ..Default::default()
        }
    }
}

/// Insert payload for `task_lists`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaskListRow<'a> {
    pub task_id: &'a str,
    pub text: &'a str,
    pub position: i32,
}

/// One list row per non-blank text, positioned in order
pub fn list_rows<'a>(task_id: &'a TaskId, input: &'a TaskInput) -> Vec<NewTaskListRow<'a>> {
    input
        .lists()
        .iter()
        .enumerate()
        .map(|(position, text)| NewTaskListRow {
            task_id: task_id.as_str(),
            text: text.as_str(),
            position: position as i32,
        })
        .collect()
}
