//! Repository Layer
//!
//! Store abstractions, row shapes and the two backends.

mod traits;
mod rows;
mod rest;
mod memory;

#[cfg(test)]
mod tests;

pub use traits::{AuthProvider, TaskStore};
pub use rows::{
    list_rows, NewTaskListRow, NewTaskRow, TaskListRow, TaskPatch, TaskRow, TASKS_TABLE,
    TASK_LISTS_TABLE, TASK_SELECT,
};
pub use rest::RestStore;
pub use memory::{MemoryStore, StoreOp};
