//! Reels publication scenarios over the scripted browser
//!
//! The browser double models the publish dialog as a stage machine, with
//! the real page's ambiguity: the next and share buttons answer to the
//! same selector. Timed waits run under a paused clock, so polling loops
//! finish instantly.

use std::io::Write;
use std::path::PathBuf;

use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{Map, Value};
use tempfile::TempDir;

use integration_tests::{InMemoryStore, ScriptedBrowser};
use quizhub_browser::{SessionStore, BROWSER_SESSION_KEY};
use quizhub_common::config::BrowserConfig;
use quizhub_core::entities::{BrowserSession, Credential, SessionCookie};
use quizhub_core::traits::CredentialRepository;
use quizhub_core::value_objects::BrowserKind;
use quizhub_reels::{login, LoginPath, PublishRequest, ReelsPipeline, SKIP_INTERMEDIATE_KEY};

const DIALOG_BUTTON: &str = r#"div[role="dialog"] div[role="button"][tabindex="0"]"#;
const FB_TOGGLE: &str = r#"input[aria-label*="Facebook"]"#;
const CAPTION: &str = r#"div[role="dialog"] div[contenteditable="true"][role="textbox"]"#;

fn config() -> BrowserConfig {
    BrowserConfig {
        webdriver_url: "http://localhost:9515".to_string(),
        remote_webdriver_url: None,
        headless: true,
        debug: false,
        manual_upload: false,
        undetected: false,
        interactive: false,
        wait_timeout_secs: 2,
        mobile_user_agent: false,
    }
}

// Each test gets its own directory; the TempDir handle keeps it alive
// and cleans it up on drop, so parallel runs never collide.
fn temp_video(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&vec![0u8; 4096]).unwrap();
    path
}

fn seed_credential(store: &InMemoryStore) -> i64 {
    store.seed_credential(Credential::new("instagram", "tester"))
}

async fn seed_valid_session(sessions: &SessionStore, credential_id: i64) {
    sessions
        .save(
            credential_id,
            vec![SessionCookie::new("sessionid", "persisted")],
            BrowserKind::Chromium,
            Map::new(),
        )
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_publish_with_facebook_crosspost() {
    let store = InMemoryStore::new();
    let credential_id = seed_credential(&store);
    let sessions = SessionStore::new(store.credential_repo());
    seed_valid_session(&sessions, credential_id).await;

    let browser = ScriptedBrowser::new();
    let config = config();
    let pipeline = ReelsPipeline::new(
        &browser,
        &sessions,
        &config,
        credential_id,
        BrowserKind::Chromium,
    );

    let dir = tempfile::tempdir().unwrap();
    let mut request = PublishRequest::new(temp_video(&dir, "crosspost.mp4"));
    request.caption = "hello".to_string();
    request.hashtags = vec!["code".to_string(), "quiz".to_string()];
    request.share_to_facebook = true;

    let outcome = pipeline.publish(&request).await;

    assert!(outcome.success, "publish failed: {:?}", outcome.error);
    assert_eq!(outcome.instagram_post_id.as_deref(), Some("CxYz12abc"));
    assert!(outcome.facebook_post_id.is_none());
    assert!(outcome.error.is_none());

    // Caption lands once, with the hashtag block appended.
    let fills = browser.fills();
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0], (CAPTION.to_string(), "hello\n\n#code #quiz".to_string()));

    // Next twice (crop, edit), Share once, and the Facebook toggle.
    let clicks = browser.clicks();
    let dialog_presses = clicks.iter().filter(|c| *c == DIALOG_BUTTON).count();
    assert_eq!(dialog_presses, 3);
    assert_eq!(clicks.iter().filter(|c| *c == FB_TOGGLE).count(), 1);

    assert_eq!(browser.uploads().len(), 1);

    // The publish is recorded in the session's extra bag for reruns.
    let session = sessions.load(credential_id).await.unwrap().unwrap();
    assert_eq!(
        session.extra.get("skip_intermediate_steps"),
        Some(&serde_json::Value::Bool(true))
    );
}

#[tokio::test(start_paused = true)]
async fn test_stuck_upload_never_presses_next() {
    let store = InMemoryStore::new();
    let credential_id = seed_credential(&store);
    let sessions = SessionStore::new(store.credential_repo());
    seed_valid_session(&sessions, credential_id).await;

    let browser = ScriptedBrowser::new();
    browser.break_upload();
    let config = config();
    let pipeline = ReelsPipeline::new(
        &browser,
        &sessions,
        &config,
        credential_id,
        BrowserKind::Chromium,
    );

    let dir = tempfile::tempdir().unwrap();
    let outcome = pipeline
        .publish(&PublishRequest::new(temp_video(&dir, "stuck.mp4")))
        .await;

    assert!(!outcome.success);
    assert!(outcome
        .error
        .as_deref()
        .is_some_and(|e| e.contains("Preview not appeared")));
    assert!(outcome.instagram_post_id.is_none());

    // The DOM still shows the drop zone, so no dialog button was pressed.
    assert!(!browser.clicks().iter().any(|c| c == DIALOG_BUTTON));
    assert!(browser.fills().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_publish_marker_suppresses_next_and_clears_when_stale() {
    let store = InMemoryStore::new();
    let credential_id = seed_credential(&store);
    let sessions = SessionStore::new(store.credential_repo());

    // A previous run recorded a finished publish, so this one must not
    // press "Next" on a dialog that never reaches the final screen.
    let mut extra = Map::new();
    extra.insert(SKIP_INTERMEDIATE_KEY.to_string(), Value::Bool(true));
    sessions
        .save(
            credential_id,
            vec![SessionCookie::new("sessionid", "persisted")],
            BrowserKind::Chromium,
            extra,
        )
        .await
        .unwrap();

    let browser = ScriptedBrowser::new();
    let config = config();
    let pipeline = ReelsPipeline::new(
        &browser,
        &sessions,
        &config,
        credential_id,
        BrowserKind::Chromium,
    );

    let dir = tempfile::tempdir().unwrap();
    let outcome = pipeline
        .publish(&PublishRequest::new(temp_video(&dir, "marked.mp4")))
        .await;

    assert!(!outcome.success);
    assert!(outcome
        .error
        .as_deref()
        .is_some_and(|e| e.contains("final screen never appeared")));

    // No "Next" press happened while the marker was honored.
    assert!(!browser.clicks().iter().any(|c| c == DIALOG_BUTTON));

    // The marker was stale, so it is gone and the next run walks the
    // dialog normally.
    let session = sessions.load(credential_id).await.unwrap().unwrap();
    assert!(session.extra.get(SKIP_INTERMEDIATE_KEY).is_none());
}

#[tokio::test]
async fn test_rejected_video_fails_before_the_browser_moves() {
    let store = InMemoryStore::new();
    let credential_id = seed_credential(&store);
    let sessions = SessionStore::new(store.credential_repo());

    let browser = ScriptedBrowser::new();
    let config = config();
    let pipeline = ReelsPipeline::new(
        &browser,
        &sessions,
        &config,
        credential_id,
        BrowserKind::Chromium,
    );

    let dir = tempfile::tempdir().unwrap();
    let outcome = pipeline
        .publish(&PublishRequest::new(temp_video(&dir, "snapshot.png")))
        .await;

    assert!(!outcome.success);
    assert!(outcome
        .error
        .as_deref()
        .is_some_and(|e| e.contains("image files cannot be published as reels")));
    assert!(browser.navigations().is_empty());
}

#[tokio::test]
async fn test_expired_session_fails_fast_without_the_login_page() {
    let store = InMemoryStore::new();
    let credential_id = seed_credential(&store);
    let sessions = SessionStore::new(store.credential_repo());

    // A session saved 8 days ago sits in storage but is past the horizon.
    let mut stale = BrowserSession::new(
        vec![SessionCookie::new("sessionid", "old")],
        BrowserKind::Chromium,
    );
    stale.saved_at = Utc::now() - ChronoDuration::days(8);
    store
        .credential_repo()
        .set_attribute(
            credential_id,
            BROWSER_SESSION_KEY,
            serde_json::to_value(&stale).unwrap(),
        )
        .await
        .unwrap();

    let browser = ScriptedBrowser::new();
    let config = config();
    let pipeline = ReelsPipeline::new(
        &browser,
        &sessions,
        &config,
        credential_id,
        BrowserKind::Chromium,
    );

    let dir = tempfile::tempdir().unwrap();
    let outcome = pipeline
        .publish(&PublishRequest::new(temp_video(&dir, "unattended.mp4")))
        .await;

    assert!(!outcome.success);
    assert!(outcome
        .error
        .as_deref()
        .is_some_and(|e| e.contains("interactive login is disabled")));

    // An unattended run must never open the login form.
    assert!(!browser
        .navigations()
        .iter()
        .any(|url| url.contains("/accounts/login")));
}

#[tokio::test(start_paused = true)]
async fn test_rejected_cookies_are_cleared_before_failing() {
    let store = InMemoryStore::new();
    let credential_id = seed_credential(&store);
    let sessions = SessionStore::new(store.credential_repo());
    seed_valid_session(&sessions, credential_id).await;

    let browser = ScriptedBrowser::new();
    browser.reject_sessions();
    let result = login::authenticate(
        &browser,
        &sessions,
        credential_id,
        BrowserKind::Chromium,
        false,
    )
    .await;

    assert!(result.is_err());
    // The dead session is gone; the next run starts clean.
    assert!(sessions.load(credential_id).await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_interactive_login_waits_for_the_human() {
    let store = InMemoryStore::new();
    let credential_id = seed_credential(&store);
    let sessions = SessionStore::new(store.credential_repo());

    let browser = ScriptedBrowser::new();
    browser.grant_login_after_polls(3);

    let path = login::authenticate(
        &browser,
        &sessions,
        credential_id,
        BrowserKind::Chromium,
        true,
    )
    .await
    .unwrap();

    assert_eq!(path, LoginPath::Interactive);
    assert!(browser
        .navigations()
        .iter()
        .any(|url| url.contains("/accounts/login")));

    // The freshly observed cookies were persisted for the next run.
    let session = sessions.load(credential_id).await.unwrap().unwrap();
    assert!(session.cookies.iter().any(|c| c.name == "sessionid"));
}

#[tokio::test(start_paused = true)]
async fn test_restored_session_skips_the_login_page() {
    let store = InMemoryStore::new();
    let credential_id = seed_credential(&store);
    let sessions = SessionStore::new(store.credential_repo());
    seed_valid_session(&sessions, credential_id).await;

    let browser = ScriptedBrowser::new();
    let path = login::authenticate(
        &browser,
        &sessions,
        credential_id,
        BrowserKind::Chromium,
        true,
    )
    .await
    .unwrap();

    assert_eq!(path, LoginPath::RestoredSession);
    assert!(!browser
        .navigations()
        .iter()
        .any(|url| url.contains("/accounts/login")));
}
