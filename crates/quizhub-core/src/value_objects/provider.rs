//! Social auth provider identifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// External identity provider attached to a canonical user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Telegram,
    Github,
    Google,
    Vk,
}

impl Provider {
    /// Stable string form used in the database and in provider payloads
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::Github => "github",
            Self::Google => "google",
            Self::Vk => "vk",
        }
    }

    /// Parse from the stable string form
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "telegram" => Some(Self::Telegram),
            "github" => Some(Self::Github),
            "google" => Some(Self::Google),
            "vk" => Some(Self::Vk),
            _ => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
