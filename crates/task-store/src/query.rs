//! Board Query
//!
//! Client-side filtering and sorting of the fetched task collection.
//! Recomputed on every render; nothing here is cached.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Task;

/// Sort selection for the task table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    /// Store order (newest first)
    #[default]
    Index,
    /// Identifier, lexicographic
    Identifier,
    /// Oldest first by creation timestamp
    CreatedDate,
    /// Completed tasks first
    Completed,
    DeadlineFarthest,
    DeadlineNearest,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::Index,
        SortOption::Identifier,
        SortOption::CreatedDate,
        SortOption::Completed,
        SortOption::DeadlineFarthest,
        SortOption::DeadlineNearest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Index => "index",
            SortOption::Identifier => "identifier",
            SortOption::CreatedDate => "createdDate",
            SortOption::Completed => "completed",
            SortOption::DeadlineFarthest => "deadlineFarthest",
            SortOption::DeadlineNearest => "deadlineNearest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Index => "Sort by Default",
            SortOption::Identifier => "Sort by ID",
            SortOption::CreatedDate => "Sort by Created Date",
            SortOption::Completed => "Sort by Completed",
            SortOption::DeadlineFarthest => "Sort by Deadline (Farthest)",
            SortOption::DeadlineNearest => "Sort by Deadline (Nearest)",
        }
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortOption::Index => Ordering::Equal,
            SortOption::Identifier => a.id.cmp(&b.id),
            // Missing timestamps go last
            SortOption::CreatedDate => (a.created_at.is_none(), a.created_at)
                .cmp(&(b.created_at.is_none(), b.created_at)),
            SortOption::Completed => b.is_complete.cmp(&a.is_complete),
            SortOption::DeadlineFarthest => b.deadline.cmp(&a.deadline),
            SortOption::DeadlineNearest => a.deadline.cmp(&b.deadline),
        }
    }
}

/// Unknown values fall back to `Index`
impl FromStr for SortOption {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .unwrap_or_default())
    }
}

/// Tasks whose title contains `search`, ignoring case
pub fn filter_tasks<'a>(tasks: &'a [Task], search: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|task| task.title_matches(search)).collect()
}

/// Stable sort in place
pub fn sort_tasks(tasks: &mut [Task], sort: SortOption) {
    if sort == SortOption::Index {
        return;
    }
    tasks.sort_by(|a, b| sort.compare(a, b));
}

/// What the table shows: filtered, then sorted
pub fn visible_tasks(tasks: &[Task], search: &str, sort: SortOption) -> Vec<Task> {
    let mut visible: Vec<Task> = filter_tasks(tasks, search).into_iter().cloned().collect();
    sort_tasks(&mut visible, sort);
    visible
}
