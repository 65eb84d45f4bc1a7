//! Instagram authentication
//!
//! Two paths into a logged-in browser: inject a persisted session's
//! cookies, or wait for a human to complete the login form. Either way
//! the resulting cookies are persisted before the pipeline proceeds.

use std::time::Duration;

use serde_json::Map;
use tracing::{info, instrument, warn};

use quizhub_browser::{Browser, SessionStore};
use quizhub_common::config::BrowserConfig;
use quizhub_core::value_objects::BrowserKind;

use crate::error::{PipelineError, PipelineResult};
use crate::selectors;

/// The cookie Instagram issues on successful login
const SESSION_COOKIE_NAME: &str = "sessionid";

/// How long a human gets to finish the login form
const INTERACTIVE_LOGIN_TIMEOUT: Duration = Duration::from_secs(300);

/// Outcome of an authentication attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPath {
    /// A persisted session was injected and accepted
    RestoredSession,
    /// A human completed the login form
    Interactive,
}

/// Inject a persisted session if one is valid; fall back to interactive
/// login when allowed.
///
/// `interactive` should be false for unattended runs; without a valid
/// session those fail fast instead of waiting five minutes for nobody.
#[instrument(skip(browser, store))]
pub async fn authenticate(
    browser: &dyn Browser,
    store: &SessionStore,
    credential_id: i64,
    browser_kind: BrowserKind,
    interactive: bool,
) -> PipelineResult<LoginPath> {
    if let Some(session) = store.load(credential_id).await? {
        browser.navigate(selectors::HOME_URL).await?;
        browser.set_cookies(&session.cookies).await?;
        browser.navigate(selectors::HOME_URL).await?;

        if is_logged_in(browser).await? {
            info!(credential_id, "restored session accepted");
            return Ok(LoginPath::RestoredSession);
        }
        warn!(credential_id, "restored session rejected, clearing it");
        store.clear(credential_id).await?;
        browser.clear_cookies().await?;
    }

    if !interactive {
        return Err(PipelineError::Session(
            "no valid session and interactive login is disabled".to_string(),
        ));
    }

    interactive_login(browser).await?;
    persist_session(browser, store, credential_id, browser_kind).await?;
    Ok(LoginPath::Interactive)
}

/// Whether the browser window must be visible.
///
/// Without a usable session, interactive login means a human typing into
/// the login form; that overrides any configured headless default. With
/// a session ready, the configured mode stands.
#[must_use]
pub fn needs_visible_window(config: &BrowserConfig, session_ready: bool) -> bool {
    config.interactive && !session_ready
}

/// Whether the page shows logged-in chrome
pub async fn is_logged_in(browser: &dyn Browser) -> PipelineResult<bool> {
    Ok(selectors::find_control(browser, selectors::LOGGED_IN_MARKER)
        .await?
        .is_some())
}

/// Open the login form and wait for a human to finish it.
///
/// Completion is detected by the appearance of the `sessionid` cookie,
/// polled once per second for up to five minutes.
#[instrument(skip(browser))]
pub async fn interactive_login(browser: &dyn Browser) -> PipelineResult<()> {
    browser.navigate(selectors::LOGIN_URL).await?;
    info!("waiting for manual login (up to 5 minutes)");

    let deadline = tokio::time::Instant::now() + INTERACTIVE_LOGIN_TIMEOUT;
    let mut elapsed = 0u64;
    loop {
        let cookies = browser.get_cookies().await?;
        if cookies.iter().any(|c| c.name == SESSION_COOKIE_NAME) {
            info!("login cookie observed after {elapsed}s");
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(PipelineError::Login(
                "manual login did not complete within 5 minutes".to_string(),
            ));
        }
        if elapsed > 0 && elapsed % 30 == 0 {
            info!(elapsed, "still waiting for manual login");
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
        elapsed += 1;
    }
}

/// Snapshot the browser's cookies into the session store
#[instrument(skip(browser, store))]
pub async fn persist_session(
    browser: &dyn Browser,
    store: &SessionStore,
    credential_id: i64,
    browser_kind: BrowserKind,
) -> PipelineResult<()> {
    let cookies = browser.get_cookies().await?;
    if !cookies.iter().any(|c| c.name == SESSION_COOKIE_NAME) {
        return Err(PipelineError::Session(
            "no login cookie present, refusing to persist".to_string(),
        ));
    }
    store
        .save(credential_id, cookies, browser_kind, Map::new())
        .await?;
    info!(credential_id, "session persisted");
    Ok(())
}
