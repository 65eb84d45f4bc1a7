//! Browser back-end identifier stored alongside persisted sessions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which browser back-end produced a persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    /// Local chromedriver with modern headless Chromium
    #[default]
    Chromium,
    /// Remote WebDriver endpoint with anti-detection options
    Remote,
}

impl BrowserKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chromium => "chromium",
            Self::Remote => "remote",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "chromium" => Some(Self::Chromium),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
