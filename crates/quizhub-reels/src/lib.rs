//! # quizhub-reels
//!
//! Instagram Reels publication pipeline.
//!
//! [`ReelsPipeline`] drives the web publish dialog through a
//! [`quizhub_browser::Browser`]: authenticate from a stored session or
//! interactively, fetch the video when the request carries a URL,
//! attach it through tiered upload, confirm the preview, classify each
//! dialog screen before acting, and read the published post id back.
//! [`GraphApiPublisher`] is the API fallback for hosted videos when a
//! Graph API token is configured.

pub mod dto;
pub mod error;
pub mod graph_api;
pub mod login;
pub mod media;
pub mod pipeline;
pub mod screen;
pub mod selectors;

pub use dto::{PublishOutcome, PublishRequest, VideoSource};
pub use error::{PipelineError, PipelineResult};
pub use graph_api::GraphApiPublisher;
pub use login::LoginPath;
pub use pipeline::{ReelsPipeline, SKIP_INTERMEDIATE_KEY};
pub use screen::Screen;
