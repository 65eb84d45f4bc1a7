//! Pipeline error types

use thiserror::Error;

use quizhub_browser::{BrowserError, Retryable};

/// Failures of the reels publication pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No valid browser session: {0}")]
    Session(String),

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Unexpected screen: {0}")]
    Screen(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Preview not appeared")]
    PreviewMissing,

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Invalid media file: {0}")]
    Media(String),

    #[error("Graph API error: {0}")]
    GraphApi(String),

    #[error(transparent)]
    Browser(#[from] BrowserError),
}

/// Whether a bounded retry of the same step may succeed
impl Retryable for PipelineError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Browser(e) => e.is_retryable(),
            Self::PreviewMissing | Self::Upload(_) | Self::GraphApi(_) => true,
            Self::Session(_) | Self::Login(_) | Self::Screen(_) | Self::Publish(_)
            | Self::Media(_) => false,
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
