// src/utils/http.rs

//! Page rendering boundary.
//!
//! Every page the harvester reads goes through a [`PageRenderer`]. The
//! shipped [`HttpRenderer`] returns the server HTML as is; a browser-backed
//! renderer can be plugged in behind the same trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Turns a URL into the final HTML of the page.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render `url` within `timeout`. Exceeding the timeout is a failure.
    async fn render(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// Render `url` through `renderer`, failing once `timeout` elapses even if
/// the renderer itself does not honor it. The call is never retried.
pub async fn render_within(
    renderer: &dyn PageRenderer,
    url: &str,
    timeout: Duration,
) -> Result<String> {
    tokio::time::timeout(timeout, renderer.render(url, timeout))
        .await
        .map_err(|_| AppError::fetch(url, format!("timed out after {:?}", timeout)))?
}

/// Renderer backed by a plain HTTP GET.
pub struct HttpRenderer {
    client: reqwest::Client,
}

impl HttpRenderer {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| AppError::fetch(url, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| AppError::fetch(url, e))?;

        response.text().await.map_err(|e| AppError::fetch(url, e))
    }
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}
