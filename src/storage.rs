//! Session Persistence
//!
//! Keeps the signed-in session in `localStorage` so a reload stays signed in.

use task_store::Session;

const SESSION_KEY: &str = "task-board.session";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_session() -> Option<Session> {
    let raw = local_storage()?.get_item(SESSION_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Discarding unreadable stored session: {}", e);
            clear_session();
            None
        }
    }
}

pub fn save_session(session: &Session) {
    let Some(storage) = local_storage() else { return };
    match serde_json::to_string(session) {
        Ok(json) => {
            if storage.set_item(SESSION_KEY, &json).is_err() {
                log::warn!("Could not persist session");
            }
        }
        Err(e) => log::warn!("Could not serialize session: {}", e),
    }
}

pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
