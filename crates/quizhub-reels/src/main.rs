//! Reels publishing binary
//!
//! Two modes:
//! - `UPDATE_INSTAGRAM_SESSION=true`: open a visible browser, wait for a
//!   manual login, persist the session, exit. Run this once per
//!   credential before unattended publishing.
//! - otherwise: publish the video given as the first argument, using
//!   the persisted session.

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::info;

use quizhub_browser::{
    stealth, BrowserGuard, BrowserOptions, ChromiumBrowser, RemoteBrowser, SessionStore,
};
use quizhub_common::config::{AppConfig, BrowserConfig};
use quizhub_common::telemetry::init_tracing;
use quizhub_core::traits::CredentialRepository;
use quizhub_core::value_objects::BrowserKind;
use quizhub_db::PgCredentialRepository;
use quizhub_reels::{login, PublishRequest, ReelsPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("loading configuration")?;

    let db_config = quizhub_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..quizhub_db::DatabaseConfig::default()
    };
    let pool = quizhub_db::create_pool(&db_config)
        .await
        .context("connecting to the database")?;

    let credentials: Arc<dyn CredentialRepository> =
        Arc::new(PgCredentialRepository::new(pool));
    let credential = credentials
        .upsert("instagram", &config.instagram.username)
        .await
        .context("resolving the instagram credential")?;
    let store = SessionStore::new(credentials);

    if config.instagram.update_session {
        return bootstrap_session(&config, &store, credential.id).await;
    }

    let video = std::env::args()
        .nth(1)
        .context("usage: quizhub-reels <video-path-or-url> [caption]")?;
    let caption = std::env::args().nth(2).unwrap_or_default();

    let mut request = if video.starts_with("http://") || video.starts_with("https://") {
        PublishRequest::from_url(video)
    } else {
        PublishRequest::new(video)
    };
    request.caption = caption;

    // With no usable session and interactive login allowed, a human has
    // to type into the login form, so the window must be visible.
    let session_ready = store
        .is_valid(credential.id)
        .await
        .context("checking the stored session")?;
    let mut opts = options(&config.browser);
    if login::needs_visible_window(&config.browser, session_ready) {
        info!("no usable session; opening a visible browser for manual login");
        opts.headless = false;
    }

    let browser_kind = browser_kind(&config.browser);
    let outcome = match browser_kind {
        BrowserKind::Remote => {
            let guard = BrowserGuard::start(RemoteBrowser::new(opts))
                .await
                .context("starting the remote browser")?;
            let pipeline = ReelsPipeline::new(
                guard.browser(),
                &store,
                &config.browser,
                credential.id,
                browser_kind,
            );
            let outcome = pipeline.publish(&request).await;
            guard.finish().await.context("stopping the browser")?;
            outcome
        }
        BrowserKind::Chromium => {
            let guard = BrowserGuard::start(ChromiumBrowser::new(opts))
                .await
                .context("starting the browser")?;
            let pipeline = ReelsPipeline::new(
                guard.browser(),
                &store,
                &config.browser,
                credential.id,
                browser_kind,
            );
            let outcome = pipeline.publish(&request).await;
            guard.finish().await.context("stopping the browser")?;
            outcome
        }
    };

    if outcome.success {
        info!(
            post_id = outcome.instagram_post_id.as_deref().unwrap_or("<unknown>"),
            "published"
        );
        Ok(())
    } else {
        bail!(
            "publish failed: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }
}

/// One-time interactive session capture with a visible browser
async fn bootstrap_session(
    config: &AppConfig,
    store: &SessionStore,
    credential_id: i64,
) -> anyhow::Result<()> {
    info!("session bootstrap: opening a visible browser for manual login");

    let mut opts = options(&config.browser);
    opts.headless = false;

    let guard = BrowserGuard::start(ChromiumBrowser::new(opts))
        .await
        .context("starting the browser")?;

    let result = async {
        login::interactive_login(guard.browser()).await?;
        login::persist_session(guard.browser(), store, credential_id, BrowserKind::Chromium).await
    }
    .await;

    guard.finish().await.context("stopping the browser")?;
    result.context("capturing the session")?;

    info!("session saved; unattended publishing is now possible");
    Ok(())
}

fn browser_kind(config: &BrowserConfig) -> BrowserKind {
    if config.undetected {
        BrowserKind::Remote
    } else {
        BrowserKind::Chromium
    }
}

fn options(config: &BrowserConfig) -> BrowserOptions {
    let webdriver_url = if config.undetected {
        config
            .remote_webdriver_url
            .clone()
            .unwrap_or_else(|| config.webdriver_url.clone())
    } else {
        config.webdriver_url.clone()
    };
    let user_agent = config
        .mobile_user_agent
        .then(|| stealth::MOBILE_USER_AGENT.to_string());

    BrowserOptions {
        webdriver_url,
        headless: config.headless && !config.debug,
        user_agent,
    }
}
