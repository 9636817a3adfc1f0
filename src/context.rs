//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use task_store::{RestStore, Session, StoreResult, TaskService};

use crate::config;
use crate::store::BoardStore;

/// The data-access service bound to the configured store
pub type Board = TaskService<RestStore>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Service, or the configuration error that prevented building it
    backend: StoredValue<StoreResult<Board>, LocalStorage>,
    /// Current session; `None` shows the auth gate
    pub session: RwSignal<Option<Session>>,
    /// False until the persisted session has been restored (or refreshed)
    pub auth_ready: RwSignal<bool>,
    /// Fetched tasks and loading flag
    pub board: BoardStore,
}

impl AppContext {
    pub fn new(board: BoardStore) -> Self {
        let backend = config::store_config().map(|config| TaskService::new(RestStore::new(config)));
        if let Err(e) = &backend {
            log::error!("Store is not configured: {}", e);
        }
        Self {
            backend: StoredValue::new_local(backend),
            session: RwSignal::new(None),
            auth_ready: RwSignal::new(false),
            board,
        }
    }

    pub fn service(&self) -> Option<Board> {
        self.backend.with_value(|backend| backend.as_ref().ok().cloned())
    }

    pub fn config_error(&self) -> Option<String> {
        self.backend
            .with_value(|backend| backend.as_ref().err().map(ToString::to_string))
    }

    /// Service and session together, only when signed in
    pub fn authed(&self) -> Option<(Board, Session)> {
        let session = self.session.get_untracked()?;
        Some((self.service()?, session))
    }

    pub fn set_session(&self, session: Option<Session>) {
        self.session.set(session);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
