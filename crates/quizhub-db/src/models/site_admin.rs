//! Site admin database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the site_admins table
#[derive(Debug, Clone, FromRow)]
pub struct SiteAdminModel {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
