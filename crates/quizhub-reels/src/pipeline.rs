//! The publication state machine
//!
//! Drives the Instagram web publish dialog end to end: authenticate,
//! open the dialog, attach the video through one of three upload tiers,
//! confirm the preview, advance through crop and edit, fill the caption
//! screen, share, and read the published post id back out of the page.
//!
//! Every screen transition is preceded by classification; the machine
//! never presses "Next" on the final screen and never presses "Share"
//! before reaching it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use quizhub_browser::{safe_retry, Browser, SessionStore};
use quizhub_common::config::BrowserConfig;
use quizhub_core::value_objects::BrowserKind;

use crate::dto::{PublishOutcome, PublishRequest, VideoSource};
use crate::error::{PipelineError, PipelineResult};
use crate::login;
use crate::media;
use crate::screen::{self, Screen};
use crate::selectors;

/// Attribute recorded in the session after a successful publish.
///
/// A later run that finds it trusts that the dialog steps already
/// completed and suppresses its own "Next" presses.
pub const SKIP_INTERMEDIATE_KEY: &str = "skip_intermediate_steps";

/// How long a human gets for the manual upload tier
const MANUAL_UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// The publish state machine over one browser and one credential
pub struct ReelsPipeline<'a> {
    browser: &'a dyn Browser,
    store: &'a SessionStore,
    config: &'a BrowserConfig,
    credential_id: i64,
    browser_kind: BrowserKind,
}

impl<'a> ReelsPipeline<'a> {
    pub fn new(
        browser: &'a dyn Browser,
        store: &'a SessionStore,
        config: &'a BrowserConfig,
        credential_id: i64,
        browser_kind: BrowserKind,
    ) -> Self {
        Self {
            browser,
            store,
            config,
            credential_id,
            browser_kind,
        }
    }

    /// Publish one reel. Never raises; failures come back in the outcome.
    #[instrument(skip(self, request), fields(video = %request.source))]
    pub async fn publish(&self, request: &PublishRequest) -> PublishOutcome {
        match self.run(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "publish failed");
                PublishOutcome::failed(e.to_string())
            }
        }
    }

    async fn run(&self, request: &PublishRequest) -> PipelineResult<PublishOutcome> {
        let video_path = self.resolve_video(&request.source).await?;

        login::authenticate(
            self.browser,
            self.store,
            self.credential_id,
            self.browser_kind,
            self.config.interactive,
        )
        .await?;
        let skip_intermediate = self.load_skip_marker().await;

        self.open_publish_dialog().await?;
        self.attach_video(&video_path).await?;
        self.await_preview().await?;
        self.advance_to_final(skip_intermediate).await?;
        self.fill_final_screen(request).await?;
        self.share().await?;

        let post_id = self.extract_post_id().await;
        self.mark_published().await;

        info!(post_id = post_id.as_deref().unwrap_or("<unknown>"), "reel published");
        Ok(PublishOutcome::published(post_id))
    }

    /// A local source is validated in place; a remote one is fetched
    /// first, which validates the saved file on the way.
    async fn resolve_video(&self, source: &VideoSource) -> PipelineResult<PathBuf> {
        match source {
            VideoSource::File(path) => {
                media::validate_video(path)?;
                Ok(path.clone())
            }
            VideoSource::Url(url) => media::download_video(url).await,
        }
    }

    /// Navigate home and open Create → Post
    async fn open_publish_dialog(&self) -> PipelineResult<()> {
        self.browser.navigate(selectors::HOME_URL).await?;
        self.browser
            .random_delay(Duration::from_millis(500), Duration::from_millis(1500))
            .await;

        let timeout = self.wait_timeout();
        if selectors::wait_for_any(self.browser, selectors::CREATE_BUTTON, timeout)
            .await?
            .is_none()
        {
            return Err(PipelineError::Screen(
                "create button never appeared, likely not logged in".to_string(),
            ));
        }
        selectors::click_first(self.browser, selectors::CREATE_BUTTON, "create button").await?;

        // Newer rollouts split Create into a submenu with a Post entry
        self.browser
            .random_delay(Duration::from_millis(300), Duration::from_millis(800))
            .await;
        if selectors::find_control(self.browser, selectors::POST_OPTION)
            .await?
            .is_some()
        {
            selectors::click_first(self.browser, selectors::POST_OPTION, "post option").await?;
        }
        Ok(())
    }

    /// Attach the video through the first working upload tier.
    ///
    /// Tier 1 sends the path straight to the hidden file input. Tier 2
    /// clicks "Select from computer" first, which mounts the input on
    /// some rollouts. Tier 3 asks a human to do it, when enabled.
    async fn attach_video(&self, video_path: &Path) -> PipelineResult<()> {
        let path = video_path.to_string_lossy();

        let current = screen::classify(self.browser).await?;
        if current != Screen::Upload {
            return Err(PipelineError::Screen(format!(
                "expected the upload screen, found {current:?}"
            )));
        }

        if let Some(input) = self.find_file_input().await? {
            debug!(input, "upload tier 1: direct file input");
            match safe_retry("direct upload", || self.browser.upload_file(input, &path)).await {
                Ok(()) => return Ok(()),
                Err(e) => warn!(error = %e, "direct upload failed, trying next tier"),
            }
        }

        if selectors::find_control(self.browser, selectors::SELECT_FROM_COMPUTER)
            .await?
            .is_some()
        {
            debug!("upload tier 2: select-from-computer button");
            selectors::click_first(
                self.browser,
                selectors::SELECT_FROM_COMPUTER,
                "select from computer",
            )
            .await?;
            self.browser
                .random_delay(Duration::from_millis(300), Duration::from_millis(800))
                .await;
            if let Some(input) = self.find_file_input().await? {
                match safe_retry("mounted upload", || self.browser.upload_file(input, &path))
                    .await
                {
                    Ok(()) => return Ok(()),
                    Err(e) => warn!(error = %e, "button-mounted upload failed"),
                }
            }
        }

        if self.config.manual_upload {
            info!(
                video = %video_path.display(),
                "upload tier 3: waiting for a human to attach the file (up to 5 minutes)"
            );
            if selectors::wait_for_preview_once(self.browser, MANUAL_UPLOAD_TIMEOUT)
                .await?
                .is_some()
            {
                return Ok(());
            }
            return Err(PipelineError::Upload(
                "manual upload did not complete within 5 minutes".to_string(),
            ));
        }

        Err(PipelineError::Upload(
            "no upload tier could attach the video".to_string(),
        ))
    }

    /// First file input present in the DOM, hidden or not.
    ///
    /// File inputs are routinely `display: none`, so this is a plain
    /// existence walk without the visibility filter.
    async fn find_file_input(&self) -> PipelineResult<Option<&'static str>> {
        for &selector in selectors::FILE_INPUT {
            if self.browser.element_exists(selector).await? {
                return Ok(Some(selector));
            }
        }
        Ok(None)
    }

    /// Wait for a genuinely visible preview; an attached-but-invisible
    /// preview is retried, never trusted.
    async fn await_preview(&self) -> PipelineResult<()> {
        let timeout = self.wait_timeout();
        safe_retry("preview gate", || async {
            match selectors::wait_for_preview_once(self.browser, timeout).await? {
                Some(selector) => {
                    debug!(selector, "preview confirmed");
                    Ok(())
                }
                None => Err(PipelineError::PreviewMissing),
            }
        })
        .await
    }

    /// Press "Next" through crop and edit until the final screen shows.
    ///
    /// Bounded at four transitions; a dialog that never reaches the
    /// final screen is an error, not a loop. A session whose publish
    /// marker says the steps already completed gets no presses at all;
    /// the marker is dropped when it turns out to be stale.
    async fn advance_to_final(&self, skip_intermediate: bool) -> PipelineResult<()> {
        for _ in 0..4 {
            match screen::classify(self.browser).await? {
                Screen::Final => return Ok(()),
                Screen::CropOrEdit if skip_intermediate => {
                    // A stray press here could overshoot the final screen.
                    debug!("publish marker set, suppressing next press");
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
                Screen::CropOrEdit => {
                    selectors::click_first(self.browser, selectors::NEXT_BUTTON, "next button")
                        .await?;
                    self.browser
                        .random_delay(Duration::from_millis(800), Duration::from_millis(2000))
                        .await;
                }
                Screen::Upload => {
                    return Err(PipelineError::Screen(
                        "fell back to the upload screen after attaching media".to_string(),
                    ));
                }
                Screen::Unknown => {
                    // Transitions render in; give the DOM a beat
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        }
        if skip_intermediate {
            self.clear_skip_marker().await;
        }
        Err(PipelineError::Screen(
            "final screen never appeared".to_string(),
        ))
    }

    /// Fill the caption and flip the requested toggles
    async fn fill_final_screen(&self, request: &PublishRequest) -> PipelineResult<()> {
        let caption = request.full_caption();
        if !caption.is_empty() {
            match selectors::find_control(self.browser, selectors::CAPTION_FIELD).await? {
                Some(field) => self.browser.fill(field, &caption).await?,
                None => {
                    return Err(PipelineError::Screen(
                        "caption field missing on the final screen".to_string(),
                    ))
                }
            }
        }

        if request.share_to_facebook {
            self.flip_toggle(selectors::FACEBOOK_TOGGLE, "facebook").await;
        }
        if request.publish_story {
            self.flip_toggle(selectors::STORY_TOGGLE, "story").await;
        }
        Ok(())
    }

    /// Toggles depend on account linkage; a missing toggle is logged,
    /// not fatal
    async fn flip_toggle(&self, ladder: &[&'static str], what: &str) {
        match selectors::find_control(self.browser, ladder).await {
            Ok(Some(selector)) => {
                if let Err(e) = self.browser.click(selector).await {
                    warn!(what, error = %e, "could not flip toggle");
                }
            }
            Ok(None) => warn!(what, "toggle not present, skipping"),
            Err(e) => warn!(what, error = %e, "toggle lookup failed"),
        }
    }

    /// Press "Share" and wait for the published confirmation
    async fn share(&self) -> PipelineResult<()> {
        if screen::classify(self.browser).await? != Screen::Final {
            return Err(PipelineError::Screen(
                "share pressed outside the final screen".to_string(),
            ));
        }
        selectors::click_first(self.browser, selectors::SHARE_BUTTON, "share button").await?;

        let timeout = self.wait_timeout();
        if selectors::wait_for_any(self.browser, selectors::SHARED_CONFIRMATION, timeout)
            .await?
            .is_none()
        {
            return Err(PipelineError::Publish(
                "no confirmation after pressing share".to_string(),
            ));
        }
        Ok(())
    }

    /// Best-effort post id from the page source
    async fn extract_post_id(&self) -> Option<String> {
        match self.browser.page_source().await {
            Ok(source) => extract_post_id(&source),
            Err(e) => {
                warn!(error = %e, "could not read page source for post id");
                None
            }
        }
    }

    /// Whether the session says a previous run already walked the
    /// dialog's intermediate steps
    async fn load_skip_marker(&self) -> bool {
        match self.store.load(self.credential_id).await {
            Ok(Some(session)) => session
                .extra
                .get(SKIP_INTERMEDIATE_KEY)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Drop a stale publish marker so the next run walks the dialog
    /// normally. Best-effort.
    async fn clear_skip_marker(&self) {
        let Ok(Some(mut session)) = self.store.load(self.credential_id).await else {
            return;
        };
        session.extra.remove(SKIP_INTERMEDIATE_KEY);
        if let Err(e) = self
            .store
            .save(
                self.credential_id,
                session.cookies,
                self.browser_kind,
                session.extra,
            )
            .await
        {
            warn!(error = %e, "stale publish marker not cleared");
        }
    }

    /// Record the publish in the session's extra bag so a crashed rerun
    /// knows the dialog steps already completed. Best-effort.
    async fn mark_published(&self) {
        let mut extra = match self.store.load(self.credential_id).await {
            Ok(Some(session)) => session.extra,
            _ => Map::new(),
        };
        extra.insert(SKIP_INTERMEDIATE_KEY.to_string(), Value::Bool(true));

        let cookies = match self.browser.get_cookies().await {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "could not snapshot cookies after publish");
                return;
            }
        };
        if let Err(e) = self
            .store
            .save(self.credential_id, cookies, self.browser_kind, extra)
            .await
        {
            warn!(error = %e, "could not persist session after publish");
        }
    }

    fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.config.wait_timeout_secs)
    }
}

/// Scan page markup for the first `/p/<id>/` or `/reel/<id>/` path
#[must_use]
pub fn extract_post_id(source: &str) -> Option<String> {
    for prefix in ["/reel/", "/p/"] {
        let mut rest = source;
        while let Some(start) = rest.find(prefix) {
            let tail = &rest[start + prefix.len()..];
            let id: String = tail
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect();
            if !id.is_empty() && tail[id.len()..].starts_with('/') {
                return Some(id);
            }
            rest = &rest[start + prefix.len()..];
        }
    }
    None
}
