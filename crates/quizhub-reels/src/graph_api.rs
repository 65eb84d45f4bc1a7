//! Graph API publish fallback
//!
//! When a long-lived access token and an Instagram business account id
//! are configured, reels can bypass the browser entirely: create a
//! `media_type=REELS` container from an externally hosted video URL,
//! poll it until processing finishes, then publish it. Local files
//! cannot go this way; the Graph API only accepts URLs it can fetch.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use quizhub_common::config::InstagramConfig;

use crate::error::{PipelineError, PipelineResult};

const GRAPH_BASE: &str = "https://graph.facebook.com/v19.0";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Container processing polls, 5 s apart
const STATUS_POLL_ATTEMPTS: u32 = 60;
const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: Option<String>,
    error: Option<GraphError>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status_code: Option<String>,
    error: Option<GraphError>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

/// Reels publishing over the Instagram Graph API
pub struct GraphApiPublisher {
    http: reqwest::Client,
    access_token: String,
    business_account_id: String,
}

impl GraphApiPublisher {
    /// Build a publisher when the config carries both the token and the
    /// business account id; `None` otherwise.
    pub fn from_config(config: &InstagramConfig) -> PipelineResult<Option<Self>> {
        if !config.graph_api_configured() {
            return Ok(None);
        }
        let (Some(token), Some(account)) =
            (config.access_token.clone(), config.business_account_id.clone())
        else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| PipelineError::GraphApi(format!("http client: {e}")))?;

        Ok(Some(Self {
            http,
            access_token: token,
            business_account_id: account,
        }))
    }

    /// Publish a reel from a hosted video URL; returns the media id
    #[instrument(skip(self, caption))]
    pub async fn publish_reel(&self, video_url: &str, caption: &str) -> PipelineResult<String> {
        let container_id = self.create_container(video_url, caption).await?;
        self.wait_until_ready(&container_id).await?;
        let media_id = self.publish_container(&container_id).await?;
        info!(media_id, "reel published via graph api");
        Ok(media_id)
    }

    async fn create_container(&self, video_url: &str, caption: &str) -> PipelineResult<String> {
        let response: IdResponse = self
            .http
            .post(format!("{GRAPH_BASE}/{}/media", self.business_account_id))
            .form(&[
                ("media_type", "REELS"),
                ("video_url", video_url),
                ("caption", caption),
                ("access_token", &self.access_token),
            ])
            .send()
            .await
            .map_err(|e| PipelineError::GraphApi(format!("create container: {e}")))?
            .json()
            .await
            .map_err(|e| PipelineError::GraphApi(format!("create container response: {e}")))?;

        if let Some(error) = response.error {
            return Err(PipelineError::GraphApi(error.message));
        }
        response
            .id
            .ok_or_else(|| PipelineError::GraphApi("container id missing".to_string()))
    }

    /// Poll the container until Instagram finishes processing the video
    async fn wait_until_ready(&self, container_id: &str) -> PipelineResult<()> {
        for attempt in 1..=STATUS_POLL_ATTEMPTS {
            let response: StatusResponse = self
                .http
                .get(format!("{GRAPH_BASE}/{container_id}"))
                .query(&[
                    ("fields", "status_code"),
                    ("access_token", &self.access_token),
                ])
                .send()
                .await
                .map_err(|e| PipelineError::GraphApi(format!("container status: {e}")))?
                .json()
                .await
                .map_err(|e| PipelineError::GraphApi(format!("container status response: {e}")))?;

            if let Some(error) = response.error {
                return Err(PipelineError::GraphApi(error.message));
            }
            match response.status_code.as_deref() {
                Some("FINISHED") => {
                    debug!(container_id, attempt, "container ready");
                    return Ok(());
                }
                Some("ERROR") => {
                    return Err(PipelineError::GraphApi(
                        "container processing failed".to_string(),
                    ));
                }
                other => debug!(container_id, attempt, status = ?other, "container not ready"),
            }
            tokio::time::sleep(STATUS_POLL_INTERVAL).await;
        }
        warn!(container_id, "container never finished processing");
        Err(PipelineError::GraphApi(
            "video processing timed out".to_string(),
        ))
    }

    async fn publish_container(&self, container_id: &str) -> PipelineResult<String> {
        let response: IdResponse = self
            .http
            .post(format!(
                "{GRAPH_BASE}/{}/media_publish",
                self.business_account_id
            ))
            .form(&[
                ("creation_id", container_id),
                ("access_token", &self.access_token),
            ])
            .send()
            .await
            .map_err(|e| PipelineError::GraphApi(format!("publish: {e}")))?
            .json()
            .await
            .map_err(|e| PipelineError::GraphApi(format!("publish response: {e}")))?;

        if let Some(error) = response.error {
            return Err(PipelineError::GraphApi(error.message));
        }
        response
            .id
            .ok_or_else(|| PipelineError::GraphApi("media id missing".to_string()))
    }
}
