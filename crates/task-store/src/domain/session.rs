//! Session
//!
//! The authenticated-user context. Every data-access call receives it
//! explicitly; nothing in this crate holds a "current user".

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Email/password pair sent to the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Absent when the auth service did not report a lifetime
    pub expires_at: Option<DateTime<Utc>>,
    pub user: User,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Whether `current` (the session now in effect, if any) is for the same user
    ///
    /// A refreshed session still counts; a sign-out or another user does not.
    pub fn is_current(&self, current: Option<&Session>) -> bool {
        current.is_some_and(|current| current.user_id() == self.user_id())
    }

    /// Expired, or expiring within the next minute
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at - Duration::seconds(60) <= now,
            None => false,
        }
    }
}
