// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Authenticated user session.
//!
//! The API hands out a JWT whose payload carries the user id and the expiry
//! time. The session is kept on disk between runs and ends on its own once
//! the token expires.

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use std::path::PathBuf;

/// How long before expiry the user is warned, in minutes.
pub const EXPIRY_WARNING_MINUTES: i64 = 5;

#[derive(Debug, Deserialize)]
struct Claims {
    id: String,
    exp: i64,
}

/// Where a session stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    /// Less than [`EXPIRY_WARNING_MINUTES`] left.
    ExpiringSoon,
    Expired,
}

/// The signed-in user and the token sent with every API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a JWT, reading `id` and `exp` from its payload.
    ///
    /// The signature is not checked; the API does that on every call.
    pub fn from_token(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| anyhow!("Token is not a JWT"))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .context("Token payload is not base64url")?;
        let claims: Claims = serde_json::from_slice(&bytes).context("Token payload lacks id or exp")?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| anyhow!("Token expiry {} is out of range", claims.exp))?;

        Ok(Self {
            token,
            user_id: claims.id,
            expires_at,
        })
    }

    pub fn status(&self, now: DateTime<Utc>) -> SessionStatus {
        if now >= self.expires_at {
            SessionStatus::Expired
        } else if self.expires_at - now <= warning_window() {
            SessionStatus::ExpiringSoon
        } else {
            SessionStatus::Active
        }
    }

    /// Time until the status next changes, `None` once expired.
    pub fn next_change(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        let deadline = match self.status(now) {
            SessionStatus::Active => self.expires_at - warning_window(),
            SessionStatus::ExpiringSoon => self.expires_at,
            SessionStatus::Expired => return None,
        };
        (deadline - now).to_std().ok()
    }
}

fn warning_window() -> TimeDelta {
    TimeDelta::minutes(EXPIRY_WARNING_MINUTES)
}

/// Saved token so a restart keeps the user signed in.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: Option<PathBuf>,
}

impl TokenStore {
    /// `None` disables saving.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Default location under the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("memefactory").join("session"))
    }

    pub fn load(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let token = std::fs::read_to_string(path).ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    pub fn save(&self, token: &str) {
        let Some(path) = &self.path else {
            return;
        };
        let result = path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|()| std::fs::write(path, token));
        if let Err(e) = result {
            log::warn!("Failed to save session to {}: {}", path.display(), e);
        }
    }

    pub fn clear(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if path.exists() {
            if let Err(e) = std::fs::remove_file(path) {
                log::warn!("Failed to remove session {}: {}", path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.signature", URL_SAFE_NO_PAD.encode(payload))
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    #[test]
    fn test_session_from_token() {
        let jwt = token(r#"{"id":"u42","exp":1700000000,"iat":1699996400}"#);
        let session = Session::from_token(jwt.clone()).unwrap();
        assert_eq!(session.token, jwt);
        assert_eq!(session.user_id, "u42");
        assert_eq!(session.expires_at, at(1_700_000_000));
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"id":"u1","exp":10}"#);
        let session = Session::from_token(format!("h.{payload}.s")).unwrap();
        assert_eq!(session.user_id, "u1");
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        assert!(Session::from_token("not-a-jwt").is_err());
        assert!(Session::from_token("h.%%%.s").is_err());
        assert!(Session::from_token(token(r#"{"id":"u1"}"#)).is_err());
        assert!(Session::from_token(token("[1, 2]")).is_err());
    }

    #[test]
    fn test_status_over_time() {
        let session = Session::from_token(token(r#"{"id":"u1","exp":10000}"#)).unwrap();
        let warning = 10_000 - EXPIRY_WARNING_MINUTES * 60;

        assert_eq!(session.status(at(0)), SessionStatus::Active);
        assert_eq!(session.status(at(warning - 1)), SessionStatus::Active);
        assert_eq!(session.status(at(warning)), SessionStatus::ExpiringSoon);
        assert_eq!(session.status(at(9_999)), SessionStatus::ExpiringSoon);
        assert_eq!(session.status(at(10_000)), SessionStatus::Expired);
        assert_eq!(session.status(at(20_000)), SessionStatus::Expired);
    }

    #[test]
    fn test_next_change() {
        let session = Session::from_token(token(r#"{"id":"u1","exp":10000}"#)).unwrap();
        let warning = 10_000 - EXPIRY_WARNING_MINUTES * 60;

        assert_eq!(
            session.next_change(at(warning - 100)),
            Some(std::time::Duration::from_secs(100))
        );
        assert_eq!(session.next_change(at(9_990)), Some(std::time::Duration::from_secs(10)));
        assert_eq!(session.next_change(at(10_000)), None);
    }

    #[test]
    fn test_token_store_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("memefactory-test-{}", uuid::Uuid::new_v4()))
            .join("session");
        let store = TokenStore::new(Some(path.clone()));
        assert_eq!(store.load(), None);

        store.save("abc.def.ghi");
        assert_eq!(store.load().as_deref(), Some("abc.def.ghi"));

        store.clear();
        assert_eq!(store.load(), None);
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir(dir);
        }
    }

    #[test]
    fn test_disabled_token_store() {
        let store = TokenStore::new(None);
        store.save("abc");
        assert_eq!(store.load(), None);
        store.clear();
    }
}
