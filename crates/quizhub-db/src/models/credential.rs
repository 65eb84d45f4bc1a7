//! Credential database model

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

/// Database model for the credentials table; `attributes` is a JSONB bag.
#[derive(Debug, Clone, FromRow)]
pub struct CredentialModel {
    pub id: i64,
    pub platform: String,
    pub username: String,
    pub attributes: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
