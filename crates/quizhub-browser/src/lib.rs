//! # quizhub-browser
//!
//! Browser automation layer for the publication pipeline.
//!
//! The [`Browser`] trait is the seam the pipeline drives; two WebDriver
//! back-ends implement it: [`ChromiumBrowser`] against a local
//! chromedriver, and [`RemoteBrowser`] against a remote endpoint with
//! extended anti-detection measures. [`SessionStore`] persists cookies
//! into a credential's attribute bag with a 7-day validity horizon.

pub mod browser;
pub mod chromium;
pub mod error;
pub mod guard;
pub mod remote;
pub mod retry;
pub mod session_store;
pub mod stealth;

mod webdriver;

pub use browser::Browser;
pub use chromium::{BrowserOptions, ChromiumBrowser};
pub use error::{BrowserError, BrowserResult};
pub use guard::BrowserGuard;
pub use remote::RemoteBrowser;
pub use retry::{safe_retry, Retryable};
pub use session_store::{SessionStore, BROWSER_SESSION_KEY};
