//! Task Store
//!
//! Data access for the task board:
//! - domain: view models, form drafts, session context, errors
//! - query: client-side filtering and sorting
//! - repository: store traits, row shapes, REST and in-memory backends
//! - service: the list/create/update/delete/toggle operations

pub mod config;
pub mod domain;
pub mod query;
pub mod repository;
pub mod service;

pub use config::StoreConfig;
pub use domain::{
    Credentials, DraftError, ListItemDraft, Session, StoreError, StoreResult, Task, TaskDraft,
    TaskId, TaskInput, TaskListItem, User,
};
pub use query::{filter_tasks, sort_tasks, visible_tasks, SortOption};
pub use repository::{AuthProvider, MemoryStore, RestStore, StoreOp, TaskStore};
pub use service::TaskService;
