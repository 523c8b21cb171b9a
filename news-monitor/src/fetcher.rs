use crate::rss_utils;
use crate::types::{FetchConfig, MonitorError, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Single-attempt HTTP retrieval of feed documents.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let redirect_policy = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirect_policy)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch the body of the feed at `url`.
    ///
    /// Non-success statuses and oversized responses are errors. There is no
    /// retry; the request is bounded by the configured timeout.
    pub async fn fetch_feed(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();
        debug!(
            "Fetching feed: {} (host {})",
            url,
            rss_utils::url::extract_host(url).unwrap_or_default()
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(MonitorError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let limit_bytes = self.config.max_feed_size_mb * 1024 * 1024;
        if let Some(content_length) = response.content_length() {
            if content_length as usize > limit_bytes {
                return Err(MonitorError::FeedTooLarge {
                    size_mb: content_length as usize / (1024 * 1024),
                });
            }
        }

        let content = response.text().await?;
        // Chunked responses carry no content length up front.
        if content.len() > limit_bytes {
            return Err(MonitorError::FeedTooLarge {
                size_mb: content.len() / (1024 * 1024),
            });
        }

        info!(
            "Fetched feed: {} ({} bytes in {}ms)",
            url,
            content.len(),
            start_time.elapsed().as_millis()
        );
        Ok(content)
    }
}
