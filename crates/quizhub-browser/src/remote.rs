//! Remote/undetected back-end
//!
//! Talks to a remote WebDriver endpoint (e.g. an undetected-chromedriver
//! sidecar) with the extended anti-detection argument set and stealth
//! script injection on every navigation.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use thirtyfour::{DesiredCapabilities, WebDriver};
use tracing::{info, instrument};

use quizhub_core::entities::SessionCookie;

use crate::browser::{Browser, ElementBox};
use crate::chromium::BrowserOptions;
use crate::error::{BrowserError, BrowserResult};
use crate::stealth::{build_args, STEALTH_SCRIPT};
use crate::webdriver as ops;

/// Chromium over a remote WebDriver endpoint with anti-detection measures
pub struct RemoteBrowser {
    options: BrowserOptions,
    driver: Option<WebDriver>,
}

impl RemoteBrowser {
    pub fn new(options: BrowserOptions) -> Self {
        Self {
            options,
            driver: None,
        }
    }

    fn driver(&self) -> BrowserResult<&WebDriver> {
        self.driver.as_ref().ok_or(BrowserError::NotStarted)
    }
}

#[async_trait]
impl Browser for RemoteBrowser {
    #[instrument(skip(self))]
    async fn start(&mut self) -> BrowserResult<()> {
        if self.driver.is_some() {
            return Ok(());
        }

        let args = build_args(
            self.options.headless,
            true,
            self.options.user_agent.as_deref(),
        );
        let mut caps = DesiredCapabilities::chrome();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": args,
                "excludeSwitches": ["enable-automation"],
                "useAutomationExtension": false,
            }),
        );

        let driver = WebDriver::new(&self.options.webdriver_url, caps)
            .await
            .map_err(|e| BrowserError::Startup(e.to_string()))?;

        info!(url = %self.options.webdriver_url, "remote browser started");
        self.driver = Some(driver);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stop(&mut self) -> BrowserResult<()> {
        if let Some(driver) = self.driver.take() {
            driver.quit().await?;
        }
        Ok(())
    }

    async fn navigate(&self, url: &str) -> BrowserResult<()> {
        let driver = self.driver()?;
        driver
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation(e.to_string()))?;
        ops::execute_script(driver, STEALTH_SCRIPT).await
    }

    async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
        visible: bool,
    ) -> BrowserResult<()> {
        ops::wait_for_element(self.driver()?, selector, timeout, visible).await
    }

    async fn element_exists(&self, selector: &str) -> BrowserResult<bool> {
        ops::element_exists(self.driver()?, selector).await
    }

    async fn element_visible(&self, selector: &str) -> BrowserResult<bool> {
        ops::element_visible(self.driver()?, selector).await
    }

    async fn element_box(&self, selector: &str) -> BrowserResult<ElementBox> {
        ops::element_box(self.driver()?, selector).await
    }

    async fn click(&self, selector: &str) -> BrowserResult<()> {
        ops::click(self.driver()?, selector).await
    }

    async fn fill(&self, selector: &str, text: &str) -> BrowserResult<()> {
        ops::fill(self.driver()?, selector, text).await
    }

    async fn upload_file(&self, selector: &str, path: &str) -> BrowserResult<()> {
        ops::upload_file(self.driver()?, selector, path).await
    }

    async fn get_cookies(&self) -> BrowserResult<Vec<SessionCookie>> {
        ops::get_cookies(self.driver()?).await
    }

    async fn set_cookies(&self, cookies: &[SessionCookie]) -> BrowserResult<()> {
        ops::set_cookies(self.driver()?, cookies).await
    }

    async fn clear_cookies(&self) -> BrowserResult<()> {
        ops::clear_cookies(self.driver()?).await
    }

    async fn page_source(&self) -> BrowserResult<String> {
        ops::page_source(self.driver()?).await
    }

    async fn current_url(&self) -> BrowserResult<String> {
        ops::current_url(self.driver()?).await
    }

    async fn execute_script(&self, script: &str) -> BrowserResult<()> {
        ops::execute_script(self.driver()?, script).await
    }

    async fn random_delay(&self, min: Duration, max: Duration) {
        ops::random_delay(min, max).await;
    }
}
