//! Browser automation errors

use thiserror::Error;

/// Result type for browser operations
pub type BrowserResult<T> = Result<T, BrowserError>;

/// Failures of the WebDriver layer
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Browser failed to start: {0}")]
    Startup(String),

    #[error("Browser is not running")]
    NotStarted,

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Timed out after {seconds}s waiting for {what}")]
    Timeout { what: String, seconds: u64 },

    #[error("File upload failed: {0}")]
    Upload(String),

    #[error("Script execution failed: {0}")]
    Script(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),
}

impl BrowserError {
    /// Whether a bounded retry may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Navigation(_)
                | Self::ElementNotFound { .. }
                | Self::Timeout { .. }
                | Self::WebDriver(_)
        )
    }
}
