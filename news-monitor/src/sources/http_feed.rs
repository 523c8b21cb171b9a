use crate::traits::FeedReader;
use crate::types::{FetchConfig, RawEntry, Result, Source};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use tracing::{info, warn};

/// Feed reader backed by HTTP and feed-rs
pub struct HttpFeedReader {
    fetcher: Fetcher,
}

impl HttpFeedReader {
    pub fn new(fetch_config: FetchConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(fetch_config)?,
        })
    }

    async fn try_fetch(&self, source: &Source) -> Result<Vec<RawEntry>> {
        let content = self.fetcher.fetch_feed(&source.url).await?;

        if !FeedParser::is_valid_feed_content(&content) {
            warn!("Content from {} does not look like a feed, parsing anyway", source.name);
        }

        FeedParser::parse_entries(&content)
    }
}

#[async_trait]
impl FeedReader for HttpFeedReader {
    fn reader_name(&self) -> String {
        "http".to_string()
    }

    async fn fetch_entries(&self, source: &Source) -> Vec<RawEntry> {
        match self.try_fetch(source).await {
            Ok(entries) => {
                if entries.is_empty() {
                    warn!("Feed {} returned no entries", source.name);
                } else {
                    info!("Pulled {} entries from {}", entries.len(), source.name);
                }
                entries
            }
            Err(e) => {
                warn!("Skipping source {} ({}): {}", source.name, source.url, e);
                Vec::new()
            }
        }
    }
}
