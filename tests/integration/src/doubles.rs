//! Scripted gateway, browser, and OAuth doubles
//!
//! The gateway double answers per-chat with scripted results and records
//! every message it delivers. The browser double models the publish
//! dialog as a stage machine: clicking the create entry opens the menu,
//! attaching a file reaches the crop screen, and so on, with the same
//! selector ambiguity as the real page (the next and share buttons share
//! a selector; only the stage decides which one it is).

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use quizhub_browser::browser::ElementBox;
use quizhub_browser::{Browser, BrowserError, BrowserResult};
use quizhub_core::entities::SessionCookie;
use quizhub_core::value_objects::{Provider, TelegramId};
use quizhub_identity::services::ServiceResult;
use quizhub_identity::{OAuthClient, OAuthToken, ProviderProfile};
use quizhub_telegram::{
    BotPermissions, ChatInfo, ChatKindInfo, ChatMemberInfo, DemoteOutcome, GatewayError,
    GatewayResult, MemberStatus, TelegramGateway,
};

// ===========================================================================
// Gateway double
// ===========================================================================

#[derive(Default)]
struct GatewayState {
    demote: HashMap<i64, Result<DemoteOutcome, GatewayError>>,
    promote: HashMap<i64, Result<(), GatewayError>>,
    ban: HashMap<i64, Result<(), GatewayError>>,
    unban: HashMap<i64, Result<(), GatewayError>>,
    kick: HashMap<i64, Result<(), GatewayError>>,
    permissions: HashMap<i64, BotPermissions>,
    members: HashMap<(i64, i64), ChatMemberInfo>,
    sent: Vec<(i64, String)>,
}

/// Per-chat scripted Telegram gateway; unscripted operations succeed
#[derive(Default)]
pub struct ScriptedGateway {
    inner: Mutex<GatewayState>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GatewayState> {
        self.inner.lock().unwrap()
    }

    pub fn script_demote(&self, chat_id: i64, result: Result<DemoteOutcome, GatewayError>) {
        self.lock().demote.insert(chat_id, result);
    }

    pub fn script_promote(&self, chat_id: i64, result: Result<(), GatewayError>) {
        self.lock().promote.insert(chat_id, result);
    }

    pub fn script_ban(&self, chat_id: i64, result: Result<(), GatewayError>) {
        self.lock().ban.insert(chat_id, result);
    }

    pub fn script_unban(&self, chat_id: i64, result: Result<(), GatewayError>) {
        self.lock().unban.insert(chat_id, result);
    }

    pub fn script_kick(&self, chat_id: i64, result: Result<(), GatewayError>) {
        self.lock().kick.insert(chat_id, result);
    }

    pub fn script_permissions(&self, chat_id: i64, permissions: BotPermissions) {
        self.lock().permissions.insert(chat_id, permissions);
    }

    pub fn script_member(&self, chat_id: i64, member: ChatMemberInfo) {
        self.lock()
            .members
            .insert((chat_id, member.user_id.into_inner()), member);
    }

    /// Messages delivered so far, as `(telegram_id, html)` pairs
    pub fn sent_messages(&self) -> Vec<(i64, String)> {
        self.lock().sent.clone()
    }
}

#[async_trait]
impl TelegramGateway for ScriptedGateway {
    async fn get_chat(&self, chat_id: i64) -> GatewayResult<ChatInfo> {
        Ok(ChatInfo {
            chat_id,
            title: Some(format!("chat {chat_id}")),
            username: None,
            kind: ChatKindInfo::Supergroup,
        })
    }

    async fn get_chat_member(
        &self,
        chat_id: i64,
        user_id: TelegramId,
    ) -> GatewayResult<ChatMemberInfo> {
        if let Some(member) = self.lock().members.get(&(chat_id, user_id.into_inner())) {
            return Ok(member.clone());
        }
        Ok(ChatMemberInfo {
            user_id,
            username: None,
            first_name: "member".to_string(),
            last_name: None,
            is_premium: false,
            status: MemberStatus::Member,
            is_anonymous: false,
            can_promote_members: false,
            can_restrict_members: false,
        })
    }

    async fn check_bot_permissions(&self, chat_id: i64) -> GatewayResult<BotPermissions> {
        Ok(self
            .lock()
            .permissions
            .get(&chat_id)
            .copied()
            .unwrap_or(BotPermissions {
                is_admin: true,
                can_promote_members: true,
                can_restrict_members: true,
                can_invite_users: true,
            }))
    }

    async fn promote_user_to_admin(
        &self,
        chat_id: i64,
        _user_id: TelegramId,
    ) -> GatewayResult<()> {
        self.lock().promote.get(&chat_id).cloned().unwrap_or(Ok(()))
    }

    async fn remove_admin_from_channel(
        &self,
        chat_id: i64,
        _user_id: TelegramId,
    ) -> GatewayResult<DemoteOutcome> {
        self.lock()
            .demote
            .get(&chat_id)
            .cloned()
            .unwrap_or(Ok(DemoteOutcome::Demoted))
    }

    async fn ban_user_from_channel(
        &self,
        chat_id: i64,
        _user_id: TelegramId,
        _until: Option<DateTime<Utc>>,
    ) -> GatewayResult<()> {
        self.lock().ban.get(&chat_id).cloned().unwrap_or(Ok(()))
    }

    async fn unban_user_from_channel(
        &self,
        chat_id: i64,
        _user_id: TelegramId,
    ) -> GatewayResult<()> {
        self.lock().unban.get(&chat_id).cloned().unwrap_or(Ok(()))
    }

    async fn remove_user_from_channel(
        &self,
        chat_id: i64,
        _user_id: TelegramId,
    ) -> GatewayResult<()> {
        self.lock().kick.get(&chat_id).cloned().unwrap_or(Ok(()))
    }

    async fn send_message_to_user(&self, user_id: TelegramId, html: &str) -> GatewayResult<()> {
        self.lock().sent.push((user_id.into_inner(), html.to_string()));
        Ok(())
    }
}

// ===========================================================================
// Browser double
// ===========================================================================

/// Where the scripted publish dialog currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    LoggedOut,
    Home,
    CreateMenu,
    Upload,
    Crop,
    Edit,
    Final,
    Shared,
}

const CREATE_SVG: &str = r#"svg[aria-label="New post"]"#;
const HOME_SVG: &str = r#"svg[aria-label="Home"]"#;
const POST_SVG: &str = r#"svg[aria-label="Post"]"#;
const FILE_INPUT: &str = r#"input[type="file"]"#;
const PREVIEW_VIDEO: &str = r#"div[role="dialog"] video"#;
const DIALOG_BUTTON: &str = r#"div[role="dialog"] div[role="button"][tabindex="0"]"#;
const CAPTION: &str = r#"div[role="dialog"] div[contenteditable="true"][role="textbox"]"#;
const FB_TOGGLE: &str = r#"input[aria-label*="Facebook"]"#;
const STORY_TOGGLE: &str = r#"input[aria-label*="story"]"#;
const CHECKMARK: &str = r#"img[alt*="Animated checkmark"]"#;

/// One element the scripted page exposes: `(selector, height, visible)`
type Element = (&'static str, f64, bool);

fn stage_elements(stage: Stage) -> Vec<Element> {
    match stage {
        Stage::LoggedOut => vec![],
        Stage::Home => vec![(CREATE_SVG, 24.0, true), (HOME_SVG, 24.0, true)],
        Stage::CreateMenu => vec![
            (CREATE_SVG, 24.0, true),
            (HOME_SVG, 24.0, true),
            (POST_SVG, 24.0, true),
        ],
        Stage::Upload => vec![(HOME_SVG, 24.0, true), (FILE_INPUT, 0.0, false)],
        Stage::Crop | Stage::Edit => vec![
            (HOME_SVG, 24.0, true),
            (PREVIEW_VIDEO, 540.0, true),
            (DIALOG_BUTTON, 32.0, true),
        ],
        Stage::Final => vec![
            (HOME_SVG, 24.0, true),
            (PREVIEW_VIDEO, 540.0, true),
            (CAPTION, 120.0, true),
            (FB_TOGGLE, 24.0, true),
            (STORY_TOGGLE, 24.0, true),
            (DIALOG_BUTTON, 32.0, true),
        ],
        Stage::Shared => vec![(HOME_SVG, 24.0, true), (CHECKMARK, 96.0, true)],
    }
}

struct BrowserInner {
    stage: Stage,
    accepts_session: bool,
    upload_works: bool,
    grant_login_after_polls: Option<u32>,
    poll_count: u32,
    cookies: Vec<SessionCookie>,
    navigations: Vec<String>,
    clicks: Vec<String>,
    fills: Vec<(String, String)>,
    uploads: Vec<String>,
    post_id: String,
}

/// Stage-machine double of the Instagram publish dialog
pub struct ScriptedBrowser {
    inner: Mutex<BrowserInner>,
}

impl Default for ScriptedBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedBrowser {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(BrowserInner {
                stage: Stage::LoggedOut,
                accepts_session: true,
                upload_works: true,
                grant_login_after_polls: None,
                poll_count: 0,
                cookies: Vec::new(),
                navigations: Vec::new(),
                clicks: Vec::new(),
                fills: Vec::new(),
                uploads: Vec::new(),
                post_id: "CxYz12abc".to_string(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BrowserInner> {
        self.inner.lock().unwrap()
    }

    /// Injected sessions will be rejected (cookies stale on the remote side)
    pub fn reject_sessions(&self) {
        self.lock().accepts_session = false;
    }

    /// Attaching a file leaves the page on the drop zone
    pub fn break_upload(&self) {
        self.lock().upload_works = false;
    }

    /// Simulate a human completing the login form after `polls` cookie reads
    pub fn grant_login_after_polls(&self, polls: u32) {
        self.lock().grant_login_after_polls = Some(polls);
    }

    pub fn navigations(&self) -> Vec<String> {
        self.lock().navigations.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.lock().clicks.clone()
    }

    pub fn fills(&self) -> Vec<(String, String)> {
        self.lock().fills.clone()
    }

    pub fn uploads(&self) -> Vec<String> {
        self.lock().uploads.clone()
    }

    fn element(&self, selector: &str) -> Option<Element> {
        let stage = self.lock().stage;
        stage_elements(stage)
            .into_iter()
            .find(|(s, _, _)| *s == selector)
    }

    fn has_session_cookie(inner: &BrowserInner) -> bool {
        inner.cookies.iter().any(|c| c.name == "sessionid")
    }
}

#[async_trait]
impl Browser for ScriptedBrowser {
    async fn start(&mut self) -> BrowserResult<()> {
        Ok(())
    }

    async fn stop(&mut self) -> BrowserResult<()> {
        Ok(())
    }

    async fn navigate(&self, url: &str) -> BrowserResult<()> {
        let mut inner = self.lock();
        inner.navigations.push(url.to_string());
        if url.contains("/accounts/login") {
            inner.stage = Stage::LoggedOut;
        } else if Self::has_session_cookie(&inner) && inner.accepts_session {
            inner.stage = Stage::Home;
        } else {
            inner.stage = Stage::LoggedOut;
        }
        Ok(())
    }

    async fn wait_for_element(
        &self,
        selector: &str,
        _timeout: Duration,
        visible: bool,
    ) -> BrowserResult<()> {
        match self.element(selector) {
            Some((_, _, is_visible)) if !visible || is_visible => Ok(()),
            _ => Err(BrowserError::Timeout {
                what: selector.to_string(),
                seconds: 0,
            }),
        }
    }

    async fn element_exists(&self, selector: &str) -> BrowserResult<bool> {
        Ok(self.element(selector).is_some())
    }

    async fn element_visible(&self, selector: &str) -> BrowserResult<bool> {
        Ok(self.element(selector).is_some_and(|(_, _, v)| v))
    }

    async fn element_box(&self, selector: &str) -> BrowserResult<ElementBox> {
        match self.element(selector) {
            Some((_, height, visible)) => Ok(ElementBox {
                x: 0.0,
                y: 0.0,
                width: if visible { 320.0 } else { 0.0 },
                height: if visible { height } else { 0.0 },
            }),
            None => Err(BrowserError::ElementNotFound {
                selector: selector.to_string(),
            }),
        }
    }

    async fn click(&self, selector: &str) -> BrowserResult<()> {
        let mut inner = self.lock();
        inner.clicks.push(selector.to_string());
        let next = match (inner.stage, selector) {
            (Stage::Home, CREATE_SVG) => Some(Stage::CreateMenu),
            (Stage::CreateMenu, POST_SVG) => Some(Stage::Upload),
            (Stage::Crop, DIALOG_BUTTON) => Some(Stage::Edit),
            (Stage::Edit, DIALOG_BUTTON) => Some(Stage::Final),
            (Stage::Final, DIALOG_BUTTON) => Some(Stage::Shared),
            _ => None,
        };
        if let Some(stage) = next {
            inner.stage = stage;
        }
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> BrowserResult<()> {
        self.lock()
            .fills
            .push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn upload_file(&self, _selector: &str, path: &str) -> BrowserResult<()> {
        let mut inner = self.lock();
        inner.uploads.push(path.to_string());
        if inner.stage == Stage::Upload && inner.upload_works {
            inner.stage = Stage::Crop;
        }
        Ok(())
    }

    async fn get_cookies(&self) -> BrowserResult<Vec<SessionCookie>> {
        let mut inner = self.lock();
        inner.poll_count += 1;
        if let Some(polls) = inner.grant_login_after_polls {
            if inner.poll_count >= polls && !Self::has_session_cookie(&inner) {
                inner
                    .cookies
                    .push(SessionCookie::new("sessionid", "granted-by-human"));
            }
        }
        Ok(inner.cookies.clone())
    }

    async fn set_cookies(&self, cookies: &[SessionCookie]) -> BrowserResult<()> {
        self.lock().cookies.extend_from_slice(cookies);
        Ok(())
    }

    async fn clear_cookies(&self) -> BrowserResult<()> {
        self.lock().cookies.clear();
        Ok(())
    }

    async fn page_source(&self) -> BrowserResult<String> {
        let inner = self.lock();
        if inner.stage == Stage::Shared {
            Ok(format!(
                r#"<html><a href="/reel/{}/">view post</a></html>"#,
                inner.post_id
            ))
        } else {
            Ok("<html>Drag photos and videos here</html>".to_string())
        }
    }

    async fn current_url(&self) -> BrowserResult<String> {
        Ok(self
            .lock()
            .navigations
            .last()
            .cloned()
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn execute_script(&self, _script: &str) -> BrowserResult<()> {
        Ok(())
    }

    async fn random_delay(&self, _min: Duration, _max: Duration) {}
}

// ===========================================================================
// OAuth client double
// ===========================================================================

/// OAuth client returning a fixed token and profile
pub struct ScriptedOAuthClient {
    pub token: OAuthToken,
    pub profile: ProviderProfile,
}

impl ScriptedOAuthClient {
    pub fn new(provider: Provider, provider_user_id: &str) -> Self {
        Self {
            token: OAuthToken::bearer("test-access-token"),
            profile: ProviderProfile::new(provider, provider_user_id),
        }
    }
}

#[async_trait]
impl OAuthClient for ScriptedOAuthClient {
    async fn exchange_code(&self, _code: &str) -> ServiceResult<OAuthToken> {
        Ok(self.token.clone())
    }

    async fn fetch_profile(&self, _token: &OAuthToken) -> ServiceResult<ProviderProfile> {
        Ok(self.profile.clone())
    }
}
