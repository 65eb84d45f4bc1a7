//! Username candidate generation and collision handling
//!
//! Every reconciler that has to mint a canonical username goes through the
//! same ladder: an ordered list of candidates derived from the provider
//! profile, the first free one wins, collisions get numeric suffixes up to
//! 1000, and a timestamped fallback closes the pathological case.

use chrono::Utc;
use tracing::instrument;

use quizhub_core::traits::UserRepository;
use quizhub_core::value_objects::{Provider, TelegramId};

use super::error::ServiceResult;

const MAX_SUFFIX: u32 = 1000;

/// Reduce an arbitrary display string to username-safe characters.
///
/// Keeps ASCII alphanumerics and underscores, lowercased; everything else
/// is dropped. Returns an empty string when nothing survives.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Candidate ladder for a Telegram widget login
#[must_use]
pub fn telegram_candidates(
    first_name: Option<&str>,
    last_name: Option<&str>,
    username: Option<&str>,
    telegram_id: TelegramId,
) -> Vec<String> {
    let mut candidates = Vec::new();

    if let (Some(first), Some(last)) = (first_name, last_name) {
        let combined = sanitize(&format!("{first}{last}"));
        if !combined.is_empty() {
            candidates.push(combined);
        }
    }
    if let Some(first) = first_name {
        let first = sanitize(first);
        if !first.is_empty() {
            candidates.push(first);
        }
    }
    if let Some(username) = username {
        let username = sanitize(username);
        if !username.is_empty() {
            candidates.push(format!("tg_{username}"));
        }
    }
    candidates.push(format!("user_{telegram_id}"));
    candidates.dedup();
    candidates
}

/// Candidate ladder for an OAuth login (GitHub / Google)
#[must_use]
pub fn oauth_candidates(
    provider: Provider,
    login: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    email: Option<&str>,
    provider_user_id: &str,
) -> Vec<String> {
    let mut candidates = Vec::new();

    if let Some(login) = login {
        let login = sanitize(login);
        if !login.is_empty() {
            candidates.push(login);
        }
    }
    if let (Some(first), Some(last)) = (first_name, last_name) {
        let combined = sanitize(&format!("{first}{last}"));
        if !combined.is_empty() {
            candidates.push(combined);
        }
    }
    if let Some(local) = email.and_then(|e| e.split('@').next()) {
        let local = sanitize(local);
        if !local.is_empty() {
            candidates.push(local);
        }
    }
    candidates.push(format!("{}_{}", provider.as_str(), sanitize(provider_user_id)));
    candidates.dedup();
    candidates
}

/// Resolve the first candidate not yet taken, suffixing on collisions.
///
/// Tries each candidate in order; if all are taken, appends `2..=1000` to
/// the first candidate; as a last resort returns the first candidate with
/// a unix-timestamp suffix.
#[instrument(skip(repo, candidates))]
pub async fn resolve_unique(
    repo: &dyn UserRepository,
    candidates: &[String],
) -> ServiceResult<String> {
    for candidate in candidates {
        if !repo.username_exists(candidate).await? {
            return Ok(candidate.clone());
        }
    }

    // All base candidates are taken; suffix the preferred one.
    let base = candidates
        .first()
        .map_or_else(|| "user".to_string(), Clone::clone);
    for n in 2..=MAX_SUFFIX {
        let candidate = format!("{base}{n}");
        if !repo.username_exists(&candidate).await? {
            return Ok(candidate);
        }
    }

    Ok(format!("{base}{}", Utc::now().timestamp()))
}
