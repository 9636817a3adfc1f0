//! Store Configuration
//!
//! Where the store lives and the public (anon) key every request carries.

use serde::{Deserialize, Serialize};

use crate::domain::{StoreError, StoreResult};

/// Local development stack default
pub const DEFAULT_STORE_URL: &str = "http://127.0.0.1:54321";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL without trailing slash
    pub url: String,
    pub anon_key: String,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> StoreResult<Self> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(StoreError::Config("store URL is empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StoreError::Config(format!("store URL must be http(s): {}", url)));
        }

        let anon_key = anon_key.into();
        let anon_key = anon_key.trim();
        if anon_key.is_empty() {
            return Err(StoreError::Config("anon key is empty".into()));
        }

        Ok(Self {
            url: url.to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Build from optional values, e.g. compile-time environment variables
    pub fn from_parts(url: Option<&str>, anon_key: Option<&str>) -> StoreResult<Self> {
        let anon_key = anon_key.ok_or_else(|| StoreError::Config("anon key is not set".into()))?;
        Self::new(url.unwrap_or(DEFAULT_STORE_URL), anon_key)
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = StoreConfig::new("https://demo.supabase.co/", "key").unwrap();
        assert_eq!(config.rest_url("tasks"), "https://demo.supabase.co/rest/v1/tasks");
        assert_eq!(config.auth_url("logout"), "https://demo.supabase.co/auth/v1/logout");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(StoreConfig::new("", "key"), Err(StoreError::Config(_))));
        assert!(matches!(StoreConfig::new("ftp://host", "key"), Err(StoreError::Config(_))));
        assert!(matches!(StoreConfig::new("http://host", "  "), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_from_parts_defaults_url() {
        let config = StoreConfig::from_parts(None, Some("anon")).unwrap();
        assert_eq!(config.url, DEFAULT_STORE_URL);
        assert!(StoreConfig::from_parts(Some("http://host"), None).is_err());
    }
}
