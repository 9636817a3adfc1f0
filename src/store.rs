//! Board State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.
//! The task list is whatever the last fetch returned; nothing is patched locally.

use leptos::prelude::*;
use reactive_stores::Store;
use task_store::Task;

/// Fetched board state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Tasks from the last successful fetch, store order
    pub tasks: Vec<Task>,
    /// True while waiting for the first fetch of a session
    pub loading: bool,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

// ========================
// Store Helper Functions
// ========================

/// Tracked read of the task list
pub fn store_tasks(store: &BoardStore) -> Vec<Task> {
    store.tasks().get()
}

pub fn store_tasks_untracked(store: &BoardStore) -> Vec<Task> {
    store.tasks().get_untracked()
}

pub fn store_loading(store: &BoardStore) -> bool {
    store.loading().get()
}

/// Replace the task list with a fresh fetch
pub fn store_set_tasks(store: &BoardStore, tasks: Vec<Task>) {
    *store.tasks().write() = tasks;
}

pub fn store_begin_loading(store: &BoardStore) {
    *store.loading().write() = true;
}

pub fn store_finish_loading(store: &BoardStore) {
    *store.loading().write() = false;
}

/// Drop everything when the session ends
pub fn store_clear(store: &BoardStore) {
    store.tasks().write().clear();
    *store.loading().write() = false;
}
