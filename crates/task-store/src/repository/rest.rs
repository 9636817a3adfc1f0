//! REST Store
//!
//! `TaskStore` and `AuthProvider` over a Supabase-style deployment:
//! PostgREST under `/rest/v1`, GoTrue under `/auth/v1`.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::StoreConfig;
use crate::domain::{Credentials, Session, StoreError, StoreResult, TaskId, User};
use super::rows::{
    NewTaskListRow, NewTaskRow, TaskPatch, TaskRow, TASKS_TABLE, TASK_LISTS_TABLE, TASK_SELECT,
};
use super::traits::{AuthProvider, TaskStore};

/// Columns echoed back by a task insert (no embedded lists yet)
const TASK_INSERT_SELECT: &str = "id,title,is_complete,deadline,created_at";

const PREFER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";

/// HTTP-backed store
#[derive(Debug, Clone)]
pub struct RestStore {
    config: StoreConfig,
    client: Client,
}

impl RestStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn anon(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", self.config.anon_key.as_str())
    }

    fn authed(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        self.anon(builder).bearer_auth(&session.access_token)
    }

    async fn auth_request(&self, grant_type: &str, body: &Value) -> StoreResult<Session> {
        let response = self
            .anon(self.client.post(self.config.auth_url("token")))
            .query(&[("grant_type", grant_type)])
            .json(body)
            .send()
            .await?;
        let auth: AuthResponse = check(response).await?.json().await?;
        Ok(auth.into_session())
    }
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

/// Pass successful responses through; turn the rest into `StoreError`
async fn check(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    log::warn!("[store] {} {}", status.as_u16(), message);

    if status == StatusCode::UNAUTHORIZED {
        Err(StoreError::Unauthorized(message))
    } else {
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Human-readable message from a PostgREST or GoTrue error body
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Token grant / signup response from the auth service
#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    /// Unix seconds
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl AuthResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .or_else(|| self.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

#[async_trait(?Send)]
impl TaskStore for RestStore {
    async fn select_tasks(&self, session: &Session) -> StoreResult<Vec<TaskRow>> {
        log::debug!("[store] select tasks for {}", session.user_id());
        let response = self
            .authed(self.client.get(self.config.rest_url(TASKS_TABLE)), session)
            .query(&[
                ("select", TASK_SELECT.to_string()),
                ("user_id", eq(session.user_id())),
                ("order", "created_at.desc".to_string()),
                ("task_lists.order", "position.asc".to_string()),
            ])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn insert_task(&self, session: &Session, row: &NewTaskRow<'_>) -> StoreResult<TaskRow> {
        log::debug!("[store] insert task '{}'", row.title);
        let response = self
            .authed(self.client.post(self.config.rest_url(TASKS_TABLE)), session)
            .query(&[("select", TASK_INSERT_SELECT)])
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&[row])
            .send()
            .await?;
        let rows: Vec<TaskRow> = check(response).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or(StoreError::EmptyResponse(TASKS_TABLE))
    }

    async fn update_task(&self, session: &Session, id: &TaskId, patch: &TaskPatch) -> StoreResult<()> {
        log::debug!("[store] update task {}", id);
        let response = self
            .authed(self.client.patch(self.config.rest_url(TASKS_TABLE)), session)
            .query(&[("id", eq(id.as_str()))])
            .header(PREFER, RETURN_MINIMAL)
            .json(patch)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn delete_task(&self, session: &Session, id: &TaskId) -> StoreResult<()> {
        log::debug!("[store] delete task {}", id);
        let response = self
            .authed(self.client.delete(self.config.rest_url(TASKS_TABLE)), session)
            .query(&[("id", eq(id.as_str()))])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn insert_lists(&self, session: &Session, rows: &[NewTaskListRow<'_>]) -> StoreResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        log::debug!("[store] insert {} list rows", rows.len());
        let response = self
            .authed(self.client.post(self.config.rest_url(TASK_LISTS_TABLE)), session)
            .header(PREFER, RETURN_MINIMAL)
            .json(rows)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn delete_lists(&self, session: &Session, task_id: &TaskId) -> StoreResult<()> {
        log::debug!("[store] delete list rows of {}", task_id);
        let response = self
            .authed(self.client.delete(self.config.rest_url(TASK_LISTS_TABLE)), session)
            .query(&[("task_id", eq(task_id.as_str()))])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthProvider for RestStore {
    async fn sign_in(&self, credentials: &Credentials) -> StoreResult<Session> {
        log::debug!("[auth] sign in {}", credentials.email);
        self.auth_request("password", &json!({
            "email": credentials.email,
            "password": credentials.password,
        }))
        .await
    }

    async fn sign_up(&self, credentials: &Credentials) -> StoreResult<Option<Session>> {
        log::debug!("[auth] sign up {}", credentials.email);
        let response = self
            .anon(self.client.post(self.config.auth_url("signup")))
            .json(credentials)
            .send()
            .await?;
        let body: Value = check(response).await?.json().await?;

        // With email confirmation on, only the user object comes back
        if body.get("access_token").is_none() {
            return Ok(None);
        }
        let auth: AuthResponse = serde_json::from_value(body)?;
        Ok(Some(auth.into_session()))
    }

    async fn refresh(&self, refresh_token: &str) -> StoreResult<Session> {
        log::debug!("[auth] refresh session");
        self.auth_request("refresh_token", &json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn sign_out(&self, session: &Session) -> StoreResult<()> {
        log::debug!("[auth] sign out {}", session.user_id());
        let response = self
            .authed(self.client.post(self.config.auth_url("logout")), session)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_keys() {
        assert_eq!(error_message(r#"{"message":"duplicate key"}"#).as_deref(), Some("duplicate key"));
        assert_eq!(error_message(r#"{"msg":"Invalid login credentials"}"#).as_deref(), Some("Invalid login credentials"));
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Refresh Token Not Found"}"#).as_deref(),
            Some("Refresh Token Not Found")
        );
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(r#"{"code":42}"#), None);
    }

    #[test]
    fn test_auth_response_prefers_absolute_expiry() {
        let auth: AuthResponse = serde_json::from_value(json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 3600,
            "expires_at": 1_700_000_000,
            "user": { "id": "u-1", "email": "a@example.com" }
        }))
        .unwrap();
        let session = auth.into_session();
        assert_eq!(session.expires_at, Utc.timestamp_opt(1_700_000_000, 0).single());
        assert_eq!(session.user_id(), "u-1");
    }

    #[test]
    fn test_auth_response_relative_expiry() {
        let auth: AuthResponse = serde_json::from_value(json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 3600,
            "user": { "id": "u-1" }
        }))
        .unwrap();
        let session = auth.into_session();
        assert!(!session.is_expired(Utc::now()));
        assert!(session.user.email.is_none());
    }
}
