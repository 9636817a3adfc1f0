//! Board Commands
//!
//! Async handlers behind the UI actions, organized by domain.
//! Each catches its own store failure and logs it; the UI only sees whether
//! the action went through.

mod tasks;
mod auth;

pub use tasks::*;
pub use auth::*;
