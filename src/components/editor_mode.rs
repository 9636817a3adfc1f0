//! Editor Mode
//!
//! Whether the board shows the table or the task form.

use task_store::Task;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum EditorMode {
    /// Table is shown
    #[default]
    Closed,
    /// Form for a new task
    Creating,
    /// Form prefilled from an existing task
    Editing(Task),
}
