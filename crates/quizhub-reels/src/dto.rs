//! Publish request and outcome types

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the video comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoSource {
    /// Remote video, fetched over HTTP before the dialog opens
    Url(String),
    /// Video already on the local filesystem
    File(PathBuf),
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One reel to publish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    /// The video to publish
    pub source: VideoSource,
    /// Caption text, hashtags excluded
    #[serde(default)]
    pub caption: String,
    /// Hashtags, with or without the leading `#`
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Cross-post to the linked Facebook page
    #[serde(default)]
    pub share_to_facebook: bool,
    /// Also publish as a story
    #[serde(default)]
    pub publish_story: bool,
}

impl PublishRequest {
    pub fn new(video_path: impl Into<PathBuf>) -> Self {
        Self::from_source(VideoSource::File(video_path.into()))
    }

    pub fn from_url(video_url: impl Into<String>) -> Self {
        Self::from_source(VideoSource::Url(video_url.into()))
    }

    fn from_source(source: VideoSource) -> Self {
        Self {
            source,
            caption: String::new(),
            hashtags: Vec::new(),
            share_to_facebook: false,
            publish_story: false,
        }
    }

    /// Caption text with the hashtag block appended
    #[must_use]
    pub fn full_caption(&self) -> String {
        let tags: Vec<String> = self
            .hashtags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| {
                if t.starts_with('#') {
                    t.to_string()
                } else {
                    format!("#{t}")
                }
            })
            .collect();

        match (self.caption.is_empty(), tags.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.caption.clone(),
            (true, false) => tags.join(" "),
            (false, false) => format!("{}\n\n{}", self.caption, tags.join(" ")),
        }
    }
}

/// Result of a publish attempt.
///
/// Errors are carried here rather than raised, so a caller always gets a
/// report it can persist or forward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishOutcome {
    pub success: bool,
    pub instagram_post_id: Option<String>,
    pub facebook_post_id: Option<String>,
    pub instagram_story_id: Option<String>,
    pub error: Option<String>,
}

impl PublishOutcome {
    #[must_use]
    pub fn published(instagram_post_id: Option<String>) -> Self {
        Self {
            success: true,
            instagram_post_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
