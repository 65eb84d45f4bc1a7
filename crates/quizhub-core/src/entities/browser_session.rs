//! Persisted browser session - cookies plus auxiliary data per credential

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::value_objects::BrowserKind;

/// Fixed validity horizon for persisted browser sessions.
pub const SESSION_TTL_DAYS: i64 = 7;

/// One browser cookie in the persisted session blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    /// Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            secure: None,
            http_only: None,
            expiry: None,
        }
    }
}

/// Cookies and auxiliary data bound to a `(platform, credential)` pair.
///
/// Valid only while `now - saved_at < 7 days` and the cookie list is
/// non-empty; expired records may be retained in storage but are inert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserSession {
    pub cookies: Vec<SessionCookie>,
    #[serde(rename = "browser_type")]
    pub browser_kind: BrowserKind,
    pub saved_at: DateTime<Utc>,
    /// Escape hatch for unknown extensions
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl BrowserSession {
    pub fn new(cookies: Vec<SessionCookie>, browser_kind: BrowserKind) -> Self {
        Self {
            cookies,
            browser_kind,
            saved_at: Utc::now(),
            extra: Map::new(),
        }
    }

    /// Whether the session is still usable at `now`
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.cookies.is_empty() && now - self.saved_at < Duration::days(SESSION_TTL_DAYS)
    }

    /// Whether the session is still usable right now
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}
