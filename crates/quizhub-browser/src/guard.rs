//! Teardown guard
//!
//! Wraps a running browser so every exit path stops it, including early
//! returns with `?`. The async stop must be awaited; dropping the guard
//! without calling [`BrowserGuard::finish`] logs a leak warning rather
//! than silently keeping the browser alive.

use tracing::warn;

use crate::browser::Browser;
use crate::error::BrowserResult;

/// Owns a started browser and guarantees an explicit stop
pub struct BrowserGuard<B: Browser> {
    browser: Option<B>,
}

impl<B: Browser> BrowserGuard<B> {
    /// Start the browser and wrap it
    pub async fn start(mut browser: B) -> BrowserResult<Self> {
        browser.start().await?;
        Ok(Self {
            browser: Some(browser),
        })
    }

    /// Access the running browser
    ///
    /// # Panics
    /// Never panics while the guard is alive; the browser is only taken
    /// out by [`finish`](Self::finish).
    #[must_use]
    pub fn browser(&self) -> &B {
        match &self.browser {
            Some(b) => b,
            // unreachable: finish() consumes self
            None => unreachable!("guard used after finish"),
        }
    }

    /// Stop the browser and consume the guard
    pub async fn finish(mut self) -> BrowserResult<()> {
        if let Some(mut browser) = self.browser.take() {
            browser.stop().await?;
        }
        Ok(())
    }
}

impl<B: Browser> Drop for BrowserGuard<B> {
    fn drop(&mut self) {
        if self.browser.is_some() {
            warn!("browser guard dropped without finish(); browser may leak");
        }
    }
}
