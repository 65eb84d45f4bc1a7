//! Telegram Login Widget payload verification
//!
//! The widget signs its payload with HMAC-SHA256 over the allowed keys in
//! lexicographic order, joined by `\n` as `key=value` pairs, keyed by
//! `SHA256(bot_token)`. `auth_date` is Unix seconds; payloads older than
//! 24 hours are rejected (exactly 24 hours old is still accepted).

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use quizhub_core::DomainError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted age of `auth_date`, in seconds.
pub const AUTH_DATE_WINDOW_SECS: i64 = 86_400;

/// Inbound Telegram Login Widget payload.
///
/// Accepted both as redirect-back query parameters and as a JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetPayload {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Unix seconds
    pub auth_date: i64,
    pub hash: String,
}

impl WidgetPayload {
    /// Build the data-check string: allowed keys in lexicographic order,
    /// `\n`-joined `key=value` pairs, `hash` excluded.
    #[must_use]
    pub fn data_check_string(&self) -> String {
        // Keys in ascending order: auth_date, first_name, id, last_name,
        // photo_url, username. Absent keys are omitted entirely.
        let mut pairs: Vec<String> = Vec::with_capacity(6);
        pairs.push(format!("auth_date={}", self.auth_date));
        if let Some(v) = &self.first_name {
            pairs.push(format!("first_name={v}"));
        }
        pairs.push(format!("id={}", self.id));
        if let Some(v) = &self.last_name {
            pairs.push(format!("last_name={v}"));
        }
        if let Some(v) = &self.photo_url {
            pairs.push(format!("photo_url={v}"));
        }
        if let Some(v) = &self.username {
            pairs.push(format!("username={v}"));
        }
        pairs.join("\n")
    }
}

/// Compute the expected widget hash for a payload under a bot token.
#[must_use]
pub fn compute_widget_hash(payload: &WidgetPayload, bot_token: &str) -> String {
    let secret = Sha256::digest(bot_token.as_bytes());
    let mut mac = HmacSha256::new_from_slice(&secret).expect("HMAC accepts keys of any length");
    mac.update(payload.data_check_string().as_bytes());
    hex_encode(&mac.finalize().into_bytes())
}

/// Verify a widget payload's signature and freshness.
///
/// # Errors
/// `InvalidSignature` on hash mismatch, `StaleAuthDate` when `auth_date`
/// is strictly older than the 24-hour window, `MissingTelegramId` when
/// the id is not positive.
pub fn verify_widget_payload(
    payload: &WidgetPayload,
    bot_token: &str,
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    if payload.id <= 0 {
        return Err(DomainError::MissingTelegramId);
    }

    let expected = compute_widget_hash(payload, bot_token);
    if !constant_time_eq(expected.as_bytes(), payload.hash.to_lowercase().as_bytes()) {
        return Err(DomainError::InvalidSignature);
    }

    let age = now.timestamp() - payload.auth_date;
    if age > AUTH_DATE_WINDOW_SECS {
        return Err(DomainError::StaleAuthDate);
    }

    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
