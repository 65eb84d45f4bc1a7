//! Stored platform credential with an extensible attribute bag

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// A stored secret bundle for one external platform (Instagram session,
/// OAuth app, bot token).
///
/// Known attribute keys (such as `browser_session`) are materialized into
/// typed values by their owning services; unknown keys ride along in the
/// JSON bag untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub id: i64,
    pub platform: String,
    pub username: String,
    pub attributes: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(platform: impl Into<String>, username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            platform: platform.into(),
            username: username.into(),
            attributes: Map::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
