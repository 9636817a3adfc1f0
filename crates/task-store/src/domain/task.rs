//! Task Entity
//!
//! View-model shape of a task and its list items, plus the validated input
//! used for create/update.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned task identifier (opaque)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A free-text sub-entry of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListItem {
    /// Store-assigned identifier
    pub id: String,
    pub text: String,
}

/// A task as rendered by the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub is_complete: bool,
    pub deadline: NaiveDate,
    /// List items in submission order
    pub lists: Vec<TaskListItem>,
    /// Set by the store on insert
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Case-insensitive substring match against the title
    pub fn title_matches(&self, search: &str) -> bool {
        self.title.to_lowercase().contains(&search.to_lowercase())
    }

    /// Deadline as shown in the table, e.g. `Mar 05, 2025`
    pub fn deadline_label(&self) -> String {
        self.deadline.format("%b %d, %Y").to_string()
    }
}

/// Validated task fields ready to be written
///
/// Blank list entries are dropped on construction, so every list text here
/// is persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub is_complete: bool,
    pub deadline: NaiveDate,
    lists: Vec<String>,
}

impl TaskInput {
    pub fn new<I, S>(title: impl Into<String>, is_complete: bool, deadline: NaiveDate, lists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lists = lists
            .into_iter()
            .map(Into::into)
            .filter(|text: &String| !text.trim().is_empty())
            .collect();
        Self {
            title: title.into(),
            is_complete,
            deadline,
            lists,
        }
    }

    /// Non-blank list texts in order
    pub fn lists(&self) -> &[String] {
        &self.lists
    }
}
