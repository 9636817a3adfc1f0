//! Task Draft
//!
//! Editable form state for creating or editing a task. The form component
//! renders this and mutates it; `submit` turns it into a `TaskInput`.

use chrono::NaiveDate;

use super::error::DraftError;
use super::task::{Task, TaskInput};

/// One editable list row; `key` is client-generated and only stable while editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemDraft {
    pub key: u64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub is_complete: bool,
    /// Raw value of the date input (`YYYY-MM-DD`), empty when unset
    pub deadline: String,
    lists: Vec<ListItemDraft>,
    next_key: u64,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskDraft {
    /// Blank draft with a single empty list row
    pub fn new() -> Self {
        let mut draft = Self {
            title: String::new(),
            is_complete: false,
            deadline: String::new(),
            lists: Vec::new(),
            next_key: 1,
        };
        draft.push_blank();
        draft
    }

    /// Draft prefilled from an existing task
    pub fn from_task(task: &Task) -> Self {
        let mut draft = Self {
            title: task.title.clone(),
            is_complete: task.is_complete,
            deadline: task.deadline.format("%Y-%m-%d").to_string(),
            lists: Vec::with_capacity(task.lists.len()),
            next_key: 1,
        };
        for item in &task.lists {
            let key = draft.take_key();
            draft.lists.push(ListItemDraft { key, text: item.text.clone() });
        }
        if draft.lists.is_empty() {
            draft.push_blank();
        }
        draft
    }

    pub fn lists(&self) -> &[ListItemDraft] {
        &self.lists
    }

    pub fn list_text(&self, key: u64) -> String {
        self.lists
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.text.clone())
            .unwrap_or_default()
    }

    pub fn is_last(&self, key: u64) -> bool {
        self.lists.last().map(|item| item.key) == Some(key)
    }

    /// A new row may be added only once every existing row has text
    pub fn can_add_list(&self) -> bool {
        self.lists.iter().all(|item| !item.text.trim().is_empty())
    }

    /// Append a blank row; returns false when adding is not allowed
    pub fn add_list(&mut self) -> bool {
        if !self.can_add_list() {
            return false;
        }
        self.push_blank();
        true
    }

    /// Rows can be removed down to one remaining
    pub fn can_remove_list(&self) -> bool {
        self.lists.len() > 1
    }

    pub fn remove_list(&mut self, key: u64) -> bool {
        if !self.can_remove_list() {
            return false;
        }
        let before = self.lists.len();
        self.lists.retain(|item| item.key != key);
        self.lists.len() != before
    }

    pub fn set_list_text(&mut self, key: u64, text: impl Into<String>) {
        if let Some(item) = self.lists.iter_mut().find(|item| item.key == key) {
            item.text = text.into();
        }
    }

    /// Validate required fields and drop blank rows
    pub fn submit(&self) -> Result<TaskInput, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::MissingTitle);
        }
        let deadline = self.deadline.trim();
        if deadline.is_empty() {
            return Err(DraftError::MissingDeadline);
        }
        let deadline = NaiveDate::parse_from_str(deadline, "%Y-%m-%d")
            .map_err(|_| DraftError::InvalidDeadline(deadline.to_string()))?;

        Ok(TaskInput::new(
            self.title.clone(),
            self.is_complete,
            deadline,
            self.lists.iter().map(|item| item.text.clone()),
        ))
    }

    fn take_key(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    fn push_blank(&mut self) {
        let key = self.take_key();
        self.lists.push(ListItemDraft { key, text: String::new() });
    }
}
