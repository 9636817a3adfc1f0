//! UI Components
//!
//! Leptos components for the auth screen and the task board.

mod auth_gate;
mod board_toolbar;
mod editor_mode;
mod task_form;
mod task_table;

pub use auth_gate::AuthGate;
pub use board_toolbar::BoardToolbar;
pub use editor_mode::EditorMode;
pub use task_form::TaskForm;
pub use task_table::TaskTable;
