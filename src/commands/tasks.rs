//! Task Commands
//!
//! List/create/update/delete/toggle against the store. Every successful
//! mutation replaces the board with the re-fetched collection.

use leptos::prelude::{GetUntracked, WithUntracked};
use task_store::{Session, StoreError, Task, TaskId, TaskInput};

use crate::context::AppContext;
use crate::store::{store_finish_loading, store_set_tasks, store_tasks_untracked};

/// Log a failed store call; a rejected session also signs the user out
fn report(ctx: AppContext, session: &Session, action: &str, e: &StoreError) {
    log::error!("Error {}: {}", action, e);
    let current = ctx.session.with_untracked(|current| session.is_current(current.as_ref()));
    if e.is_auth_failure() && current {
        log::warn!("Session rejected by the store, signing out");
        ctx.set_session(None);
    }
}

/// Put a fetched collection on the board unless the session changed meanwhile
///
/// Returns false when the rows belong to a session that has since signed out
/// or been replaced by another user.
fn apply_fetch(ctx: AppContext, session: &Session, tasks: Vec<Task>) -> bool {
    let current = ctx.session.with_untracked(|current| session.is_current(current.as_ref()));
    if current {
        store_set_tasks(&ctx.board, tasks);
    } else {
        log::debug!("Dropping {} tasks fetched for a previous session", tasks.len());
    }
    current
}

pub async fn fetch_tasks(ctx: AppContext) {
    let Some((service, session)) = ctx.authed() else {
        store_finish_loading(&ctx.board);
        return;
    };
    match service.list(&session).await {
        Ok(tasks) => {
            log::debug!("Loaded {} tasks", tasks.len());
            apply_fetch(ctx, &session, tasks);
        }
        Err(e) => report(ctx, &session, "fetching tasks", &e),
    }
    // A newer session has its own fetch in flight and owns the loading flag
    if session.is_current(ctx.session.get_untracked().as_ref()) {
        store_finish_loading(&ctx.board);
    }
}

/// Returns true once the task is written and the board refreshed
pub async fn create_task(ctx: AppContext, input: TaskInput) -> bool {
    let Some((service, session)) = ctx.authed() else { return false };
    match service.create(&session, &input).await {
        Ok(tasks) => apply_fetch(ctx, &session, tasks),
        Err(e) => {
            report(ctx, &session, "creating task", &e);
            false
        }
    }
}

pub async fn update_task(ctx: AppContext, id: TaskId, input: TaskInput) -> bool {
    let Some((service, session)) = ctx.authed() else { return false };
    match service.update(&session, &id, &input).await {
        Ok(tasks) => apply_fetch(ctx, &session, tasks),
        Err(e) => {
            report(ctx, &session, "updating task", &e);
            false
        }
    }
}

/// Returns true once the task is gone and the board refreshed
pub async fn delete_task(ctx: AppContext, id: TaskId) -> bool {
    let Some((service, session)) = ctx.authed() else { return false };
    match service.delete(&session, &id).await {
        Ok(tasks) => apply_fetch(ctx, &session, tasks),
        Err(e) => {
            report(ctx, &session, "deleting task", &e);
            false
        }
    }
}

pub async fn toggle_complete(ctx: AppContext, id: TaskId) {
    let Some((service, session)) = ctx.authed() else { return };
    let current = store_tasks_untracked(&ctx.board);
    match service.toggle_complete(&session, &current, &id).await {
        Ok(Some(tasks)) => {
            apply_fetch(ctx, &session, tasks);
        }
        Ok(None) => {}
        Err(e) => report(ctx, &session, "toggling task completion", &e),
    }
}
