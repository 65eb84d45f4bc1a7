//! Site admin entity - the staff projection of a canonical user

use chrono::{DateTime, Utc};

use super::CanonicalUser;

/// Derived "staff" projection of a canonical user.
///
/// A row exists if and only if the canonical user has `is_staff` or
/// `is_superuser`; it is maintained by profile propagation and never
/// edited independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteAdmin {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteAdmin {
    /// Project the admin-relevant subset of a canonical user
    #[must_use]
    pub fn from_user(user: &CanonicalUser) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_superuser: user.is_superuser,
            created_at: now,
            updated_at: now,
        }
    }
}
