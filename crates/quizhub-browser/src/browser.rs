//! The browser trait - what the publication pipeline drives

use std::time::Duration;

use async_trait::async_trait;

use quizhub_core::entities::SessionCookie;

use crate::error::BrowserResult;

/// Location and size of an element on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementBox {
    /// True when the element occupies actual screen area
    #[must_use]
    pub fn is_non_zero(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Driver-agnostic browser operations.
///
/// Selectors are CSS. Waits poll once per second up to the given timeout.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Launch the underlying browser
    async fn start(&mut self) -> BrowserResult<()>;

    /// Tear the browser down. Idempotent.
    async fn stop(&mut self) -> BrowserResult<()>;

    async fn navigate(&self, url: &str) -> BrowserResult<()>;

    /// Wait for an element matching `selector`; when `visible` is set the
    /// element must also be displayed with a non-zero box.
    async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
        visible: bool,
    ) -> BrowserResult<()>;

    /// Whether a matching element currently exists
    async fn element_exists(&self, selector: &str) -> BrowserResult<bool>;

    /// Whether a matching element exists and is displayed
    async fn element_visible(&self, selector: &str) -> BrowserResult<bool>;

    /// Bounding box of the first matching element
    async fn element_box(&self, selector: &str) -> BrowserResult<ElementBox>;

    async fn click(&self, selector: &str) -> BrowserResult<()>;

    /// Clear the element and type `text` into it
    async fn fill(&self, selector: &str, text: &str) -> BrowserResult<()>;

    /// Send a local file path to a file input, tolerating hidden or
    /// detached inputs via a script fallback.
    async fn upload_file(&self, selector: &str, path: &str) -> BrowserResult<()>;

    async fn get_cookies(&self) -> BrowserResult<Vec<SessionCookie>>;

    async fn set_cookies(&self, cookies: &[SessionCookie]) -> BrowserResult<()>;

    async fn clear_cookies(&self) -> BrowserResult<()>;

    async fn page_source(&self) -> BrowserResult<String>;

    async fn current_url(&self) -> BrowserResult<String>;

    /// Execute JavaScript in the page
    async fn execute_script(&self, script: &str) -> BrowserResult<()>;

    /// Sleep a uniformly random interval; spreads out scripted actions
    async fn random_delay(&self, min: Duration, max: Duration);
}
