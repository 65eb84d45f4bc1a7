//! Persisted browser sessions
//!
//! Cookies plus auxiliary data are stored under the `browser_session` key
//! of a credential's attribute bag. A record is served only while it is
//! younger than the 7-day horizon and carries at least one cookie;
//! expired rows stay in storage but are never returned.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use quizhub_core::entities::{BrowserSession, SessionCookie};
use quizhub_core::traits::CredentialRepository;
use quizhub_core::value_objects::BrowserKind;

use crate::error::{BrowserError, BrowserResult};

/// Attribute-bag key holding the serialized session
pub const BROWSER_SESSION_KEY: &str = "browser_session";

/// Session persistence over the credential attribute bag
#[derive(Clone)]
pub struct SessionStore {
    credentials: Arc<dyn CredentialRepository>,
}

impl SessionStore {
    pub fn new(credentials: Arc<dyn CredentialRepository>) -> Self {
        Self { credentials }
    }

    /// Persist the current cookies for a credential
    #[instrument(skip(self, cookies, extra))]
    pub async fn save(
        &self,
        credential_id: i64,
        cookies: Vec<SessionCookie>,
        browser_kind: BrowserKind,
        extra: Map<String, Value>,
    ) -> BrowserResult<()> {
        let mut session = BrowserSession::new(cookies, browser_kind);
        session.extra = extra;

        let value = serde_json::to_value(&session)
            .map_err(|e| BrowserError::Session(format!("serialize session: {e}")))?;
        self.credentials
            .set_attribute(credential_id, BROWSER_SESSION_KEY, value)
            .await
            .map_err(|e| BrowserError::Session(e.to_string()))?;

        debug!(credential_id, "browser session saved");
        Ok(())
    }

    /// Load a session if one exists and is still valid
    #[instrument(skip(self))]
    pub async fn load(&self, credential_id: i64) -> BrowserResult<Option<BrowserSession>> {
        let Some(raw) = self
            .credentials
            .get_attribute(credential_id, BROWSER_SESSION_KEY)
            .await
            .map_err(|e| BrowserError::Session(e.to_string()))?
        else {
            return Ok(None);
        };

        let session: BrowserSession = match serde_json::from_value(raw) {
            Ok(s) => s,
            Err(e) => {
                warn!(credential_id, error = %e, "stored session is unreadable");
                return Ok(None);
            }
        };

        if !session.is_valid_at(Utc::now()) {
            debug!(credential_id, "stored session expired or empty");
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Whether a valid session exists
    pub async fn is_valid(&self, credential_id: i64) -> BrowserResult<bool> {
        Ok(self.load(credential_id).await?.is_some())
    }

    /// Remove the stored session
    #[instrument(skip(self))]
    pub async fn clear(&self, credential_id: i64) -> BrowserResult<()> {
        self.credentials
            .remove_attribute(credential_id, BROWSER_SESSION_KEY)
            .await
            .map_err(|e| BrowserError::Session(e.to_string()))?;
        Ok(())
    }
}
