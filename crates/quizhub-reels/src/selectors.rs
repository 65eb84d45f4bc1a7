//! Ordered DOM selectors for the publish dialog
//!
//! Instagram's markup shifts between rollouts, so every interaction point
//! carries a selector ladder ordered most-specific-first. A match is
//! accepted only when the element is visible, has a non-zero box, and is
//! not taller than a plausible control (a tall match means the selector
//! caught a container, not the button).

use std::time::Duration;

use quizhub_browser::{Browser, BrowserError};

use crate::error::PipelineResult;

/// A control taller than this is a container mismatch
pub const MAX_CONTROL_HEIGHT: f64 = 160.0;

pub const HOME_URL: &str = "https://www.instagram.com/";
pub const LOGIN_URL: &str = "https://www.instagram.com/accounts/login/";

/// Sidebar / toolbar "Create" entry
pub const CREATE_BUTTON: &[&str] = &[
    r#"svg[aria-label="New post"]"#,
    r##"a[href="#"] svg[aria-label="New post"]"##,
    r#"svg[aria-label="Create"]"#,
    r#"[role="link"][tabindex="0"] svg[aria-label="Create"]"#,
];

/// "Post" entry of the create submenu (absent on older rollouts)
pub const POST_OPTION: &[&str] = &[
    r#"svg[aria-label="Post"]"#,
    r#"a[href*="create/select"]"#,
];

/// Hidden file input of the upload screen
pub const FILE_INPUT: &[&str] = &[
    r#"input[type="file"][accept*="video"]"#,
    r#"form[enctype="multipart/form-data"] input[type="file"]"#,
    r#"input[type="file"]"#,
];

/// Visible "Select from computer" button of the upload screen
pub const SELECT_FROM_COMPUTER: &[&str] = &[
    r#"div[role="dialog"] button[type="button"]"#,
    r#"button[tabindex="0"]"#,
];

/// Preview of the uploaded media on the crop/edit screens; any of a
/// video element, a blob-backed image, or a canvas counts
pub const PREVIEW: &[&str] = &[
    r#"div[role="dialog"] video"#,
    r#"div[role="dialog"] img[src^="blob:"]"#,
    r#"div[role="dialog"] canvas"#,
    "video",
    r#"img[src^="blob:"]"#,
];

/// "Next" on the crop and edit screens
pub const NEXT_BUTTON: &[&str] = &[
    r#"div[role="dialog"] div[role="button"][tabindex="0"]"#,
    r#"div[role="button"][tabindex="0"]"#,
];

/// Caption editor of the final screen
pub const CAPTION_FIELD: &[&str] = &[
    r#"div[role="dialog"] div[contenteditable="true"][role="textbox"]"#,
    r#"textarea[aria-label="Write a caption..."]"#,
    r#"div[contenteditable="true"]"#,
];

/// "Share" on the final screen
pub const SHARE_BUTTON: &[&str] = &[
    r#"div[role="dialog"] div[role="button"][tabindex="0"]"#,
];

/// Facebook cross-post toggle on the final screen
pub const FACEBOOK_TOGGLE: &[&str] = &[
    r#"input[aria-label*="Facebook"]"#,
    r#"div[role="dialog"] input[type="checkbox"]"#,
];

/// "Also share to story" toggle on the final screen
pub const STORY_TOGGLE: &[&str] = &[
    r#"input[aria-label*="story"]"#,
];

/// Post-publish confirmation
pub const SHARED_CONFIRMATION: &[&str] = &[
    r#"img[alt*="Animated checkmark"]"#,
    r#"div[role="dialog"] svg[aria-label="Animated checkmark"]"#,
];

/// Marker that the session is authenticated (home feed chrome)
pub const LOGGED_IN_MARKER: &[&str] = &[
    r#"svg[aria-label="Home"]"#,
    r#"a[href="/direct/inbox/"]"#,
];

/// Find the first selector whose element is a plausible visible control.
///
/// Returns `None` when nothing on the ladder matches.
pub async fn find_control(
    browser: &dyn Browser,
    selectors: &[&'static str],
) -> PipelineResult<Option<&'static str>> {
    for &selector in selectors {
        if !browser.element_exists(selector).await? {
            continue;
        }
        if !browser.element_visible(selector).await.unwrap_or(false) {
            continue;
        }
        let bounds = browser.element_box(selector).await?;
        if !bounds.is_non_zero() || bounds.height > MAX_CONTROL_HEIGHT {
            continue;
        }
        return Ok(Some(selector));
    }
    Ok(None)
}

/// Find a visible media preview.
///
/// Previews are large by nature, so the control-height cap does not
/// apply; the element still has to be displayed with a non-zero box.
pub async fn find_preview(browser: &dyn Browser) -> PipelineResult<Option<&'static str>> {
    for &selector in PREVIEW {
        if !browser.element_exists(selector).await? {
            continue;
        }
        if !browser.element_visible(selector).await.unwrap_or(false) {
            continue;
        }
        let bounds = browser.element_box(selector).await?;
        if bounds.is_non_zero() {
            return Ok(Some(selector));
        }
    }
    Ok(None)
}

/// Wait until a visible preview appears, polling once per second
pub async fn wait_for_preview_once(
    browser: &dyn Browser,
    timeout: Duration,
) -> PipelineResult<Option<&'static str>> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(selector) = find_preview(browser).await? {
            return Ok(Some(selector));
        }
        if tokio::time::Instant::now() >= deadline {
            return Ok(None);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

/// Click the first plausible control on the ladder
pub async fn click_first(
    browser: &dyn Browser,
    selectors: &[&'static str],
    what: &str,
) -> PipelineResult<()> {
    match find_control(browser, selectors).await? {
        Some(selector) => {
            browser.click(selector).await?;
            Ok(())
        }
        None => Err(BrowserError::ElementNotFound {
            selector: what.to_string(),
        }
        .into()),
    }
}

/// Wait until any selector on the ladder becomes a plausible control
pub async fn wait_for_any(
    browser: &dyn Browser,
    selectors: &[&'static str],
    timeout: Duration,
) -> PipelineResult<Option<&'static str>> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(selector) = find_control(browser, selectors).await? {
            return Ok(Some(selector));
        }
        if tokio::time::Instant::now() >= deadline {
            return Ok(None);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}
