//! Auth Commands
//!
//! Sign-in/up/out and session restore. Unlike task commands, sign-in and
//! sign-up failures are returned so the auth form can show them.

use chrono::{DateTime, Utc};
use leptos::prelude::Set;
use task_store::{AuthProvider, Credentials, Session};

use crate::context::AppContext;
use crate::storage;

/// What a successful sign-up led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn,
    /// The account must be confirmed by email first
    ConfirmationSent,
}

fn not_configured(ctx: AppContext) -> String {
    ctx.config_error()
        .unwrap_or_else(|| "Store is not configured".to_string())
}

pub async fn sign_in(ctx: AppContext, credentials: Credentials) -> Result<(), String> {
    let service = ctx.service().ok_or_else(|| not_configured(ctx))?;
    match service.store().sign_in(&credentials).await {
        Ok(session) => {
            log::info!("Signed in as {}", session.user_id());
            ctx.set_session(Some(session));
            Ok(())
        }
        Err(e) => {
            log::error!("Error signing in: {}", e);
            Err(e.to_string())
        }
    }
}

pub async fn sign_up(ctx: AppContext, credentials: Credentials) -> Result<SignUpOutcome, String> {
    let service = ctx.service().ok_or_else(|| not_configured(ctx))?;
    match service.store().sign_up(&credentials).await {
        Ok(Some(session)) => {
            log::info!("Signed up as {}", session.user_id());
            ctx.set_session(Some(session));
            Ok(SignUpOutcome::SignedIn)
        }
        Ok(None) => Ok(SignUpOutcome::ConfirmationSent),
        Err(e) => {
            log::error!("Error signing up: {}", e);
            Err(e.to_string())
        }
    }
}

/// Ends the session locally even when the store call fails
pub async fn sign_out(ctx: AppContext) {
    if let Some((service, session)) = ctx.authed() {
        if let Err(e) = service.store().sign_out(&session).await {
            log::error!("Error signing out: {}", e);
        }
    }
    ctx.set_session(None);
}

/// What to do with a session found in storage at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Restore {
    Use,
    Refresh,
    /// Expired with no store to refresh against
    Discard,
}

fn restore_plan(stored: &Session, now: DateTime<Utc>, configured: bool) -> Restore {
    if !stored.is_expired(now) {
        Restore::Use
    } else if configured {
        Restore::Refresh
    } else {
        Restore::Discard
    }
}

/// Pick up the persisted session, refreshing it if it has expired
pub async fn restore_session(ctx: AppContext) {
    if let Some(stored) = storage::load_session() {
        let service = ctx.service();
        match (restore_plan(&stored, Utc::now(), service.is_some()), service) {
            (Restore::Use, _) => ctx.set_session(Some(stored)),
            (Restore::Refresh, Some(service)) => {
                match service.store().refresh(&stored.refresh_token).await {
                    Ok(session) => ctx.set_session(Some(session)),
                    Err(e) => {
                        log::warn!("Stored session could not be refreshed: {}", e);
                        storage::clear_session();
                    }
                }
            }
            (Restore::Refresh, None) | (Restore::Discard, _) => {
                log::warn!("Discarding expired stored session");
                storage::clear_session();
            }
        }
    }
    ctx.auth_ready.set(true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use task_store::User;

    fn stored(expires_at: Option<DateTime<Utc>>) -> Session {
        Session {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at,
            user: User { id: "user-1".into(), email: None },
        }
    }

    #[test]
    fn test_live_session_is_used() {
        let now = Utc::now();
        let session = stored(Some(now + Duration::hours(1)));
        assert_eq!(restore_plan(&session, now, true), Restore::Use);
        assert_eq!(restore_plan(&stored(None), now, false), Restore::Use);
    }

    #[test]
    fn test_expired_session_is_refreshed_when_configured() {
        let now = Utc::now();
        let session = stored(Some(now - Duration::minutes(5)));
        assert_eq!(restore_plan(&session, now, true), Restore::Refresh);
    }

    #[test]
    fn test_expired_session_is_discarded_without_store() {
        let now = Utc::now();
        let session = stored(Some(now - Duration::minutes(5)));
        assert_eq!(restore_plan(&session, now, false), Restore::Discard);
    }
}
