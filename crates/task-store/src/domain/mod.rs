//! Domain Layer
//!
//! View models, form drafts, the session context and error types.
//! No store or transport types live here.

mod error;
mod task;
mod draft;
mod session;

pub use error::{StoreError, StoreResult, DraftError};
pub use task::{Task, TaskId, TaskListItem, TaskInput};
pub use draft::{TaskDraft, ListItemDraft};
pub use session::{Credentials, Session, User};
