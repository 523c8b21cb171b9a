use crate::rss_utils;
use crate::types::{FetchConfig, KeywordGroup, MonitorError, Result, Source};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Longest accepted lookback window: 100 years.
pub const MAX_LOOKBACK_HOURS: i64 = 24 * 366 * 100;

/// What to do with an entry whose published time is absent or unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDatePolicy {
    /// Treat the entry as infinitely old, so the recency filter drops it.
    #[default]
    Exclude,
    /// Stamp the entry with the run's "now", so it is kept.
    AssumeNow,
}

/// Read-only monitor configuration, built once and passed to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub sources: Vec<Source>,
    /// Order matters: the first fully matching group wins.
    pub keyword_groups: Vec<KeywordGroup>,
    pub lookback_hours: i64,
    pub missing_date_policy: MissingDatePolicy,
    pub fetch: FetchConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            keyword_groups: default_keyword_groups(),
            lookback_hours: 24,
            missing_date_policy: MissingDatePolicy::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load a JSON file; fields it omits keep their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;

        debug!(
            "Loaded {} sources and {} keyword groups",
            config.sources.len(),
            config.keyword_groups.len()
        );
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn lookback(&self) -> Duration {
        Duration::hours(self.lookback_hours.clamp(0, MAX_LOOKBACK_HOURS))
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookback_hours <= 0 || self.lookback_hours > MAX_LOOKBACK_HOURS {
            return Err(MonitorError::Config(format!(
                "lookback_hours must be between 1 and {}, got {}",
                MAX_LOOKBACK_HOURS, self.lookback_hours
            )));
        }

        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(MonitorError::Config(format!(
                    "source with URL {} has an empty name",
                    source.url
                )));
            }
            if !rss_utils::url::is_valid_feed_url(&source.url) {
                return Err(MonitorError::Config(format!(
                    "source {} has an invalid feed URL: {}",
                    source.name, source.url
                )));
            }
        }

        let mut group_names = HashSet::new();
        for group in &self.keyword_groups {
            if !group_names.insert(group.name.as_str()) {
                return Err(MonitorError::Config(format!(
                    "duplicate keyword group: {}",
                    group.name
                )));
            }
            if group.keywords.is_empty() || group.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(MonitorError::Config(format!(
                    "keyword group {} needs at least one non-empty keyword",
                    group.name
                )));
            }
        }

        if self.fetch.max_concurrent_fetches == 0 {
            return Err(MonitorError::Config(
                "fetch.max_concurrent_fetches must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn group_names(&self) -> Vec<String> {
        self.keyword_groups.iter().map(|g| g.name.clone()).collect()
    }
}

pub fn default_sources() -> Vec<Source> {
    vec![
        // Google News searches
        Source::new("Google News - Nuclear Energy", "https://news.google.com/rss/search?q=nuclear+energy"),
        Source::new("Google News - Tariffs", "https://news.google.com/rss/search?q=tariffs"),
        Source::new("Google News - Politics", "https://news.google.com/rss/search?q=politics"),
        Source::new("Google News - Markets", "https://news.google.com/rss/search?q=markets"),
        Source::new("Google News - Economy", "https://news.google.com/rss/search?q=economy"),
        Source::new("Google News - Trade", "https://news.google.com/rss/search?q=trade"),
        Source::new("Google News - Bloomberg", "https://news.google.com/rss/search?q=Bloomberg"),
        Source::new("Google News - Reuters", "https://news.google.com/rss/search?q=Reuters"),
        Source::new("Google News - CNBC", "https://news.google.com/rss/search?q=CNBC"),
        Source::new("Google News - MarketWatch", "https://news.google.com/rss/search?q=MarketWatch"),
        Source::new("Google News - Financial Times", "https://news.google.com/rss/search?q=Financial+Times"),
        // Government
        Source::new("US NRC News", "https://www.nrc.gov/reading-rm/doc-collections/news/rss.xml"),
        Source::new("DOE Press Office", "https://www.energy.gov/doe-press-office/rss.xml"),
        Source::new("DOE News", "https://www.energy.gov/articles/rss.xml"),
        Source::new("EIA News", "https://www.eia.gov/rss/news.xml"),
        // Publishers
        Source::new("Reuters Energy", "https://www.reuters.com/business/energy/rss"),
        Source::new("Reuters Business", "https://www.reuters.com/rssFeed/businessNews"),
        Source::new("Reuters Politics", "https://www.reuters.com/politics/rss"),
        Source::new("Bloomberg Energy", "https://www.bloomberg.com/feeds/podcast/energy-news.xml"),
        Source::new("Bloomberg Top Stories", "https://www.bloomberg.com/feed/podcast/top-stories.xml"),
        Source::new("Bloomberg Markets", "https://www.bloomberg.com/feeds/podcast/markets.xml"),
        Source::new("Bloomberg Politics", "https://www.bloomberg.com/feeds/podcast/politics.xml"),
        Source::new("CNBC Top News", "https://www.cnbc.com/id/100003114/device/rss/rss.html"),
        Source::new("CNBC Markets", "https://www.cnbc.com/id/100003114/device/rss/rss.html"),
        Source::new("CNBC Politics", "https://www.cnbc.com/id/10000113/device/rss/rss.html"),
        Source::new("MarketWatch Top Stories", "https://www.marketwatch.com/rss/topstories"),
        Source::new("MarketWatch Markets", "https://www.marketwatch.com/rss/markets"),
        Source::new("MarketWatch Economy", "https://www.marketwatch.com/rss/economy"),
        Source::new("Financial Times", "https://www.ft.com/?format=rss"),
        Source::new("Financial Times Markets", "https://www.ft.com/markets/rss"),
        Source::new("Financial Times Politics", "https://www.ft.com/politics/rss"),
        Source::new("Washington Post Energy", "https://www.washingtonpost.com/rss/energy-environment/"),
        Source::new("NPR Energy", "https://www.npr.org/rss/rss.php?id=1017"),
        // Bing News searches
        Source::new("Bing News - Nuclear Energy", "https://www.bing.com/news/search?q=nuclear+energy&format=rss"),
        Source::new("Bing News - Politics", "https://www.bing.com/news/search?q=politics&format=rss"),
        Source::new("Bing News - Markets", "https://www.bing.com/news/search?q=markets&format=rss"),
        Source::new("Bing News - Economy", "https://www.bing.com/news/search?q=economy&format=rss"),
        Source::new("Bing News - Trade", "https://www.bing.com/news/search?q=trade&format=rss"),
    ]
}

/// Phrase groups sit directly before the single-word group they refine,
/// otherwise first-match would never reach them.
pub fn default_keyword_groups() -> Vec<KeywordGroup> {
    vec![
        KeywordGroup::new("Executive Order & Trump", &["executive order", "trump"]),
        KeywordGroup::new("Tariffs & Trump", &["tariff", "trump"]),
        KeywordGroup::new("Trade War", &["trade war"]),
        KeywordGroup::new("Levies", &["levies"]),
        KeywordGroup::new("Nuclear Licensing", &["nuclear licensing"]),
        KeywordGroup::new("Nuclear", &["nuclear"]),
        KeywordGroup::new("Uranium Enrichment", &["uranium enrichment"]),
        KeywordGroup::new("Uranium", &["uranium"]),
        KeywordGroup::new("Fission", &["fission"]),
        KeywordGroup::new("Fusion", &["fusion"]),
        KeywordGroup::new("DOE", &["doe"]),
        KeywordGroup::new("NRC", &["nrc"]),
        KeywordGroup::new("Section 232", &["section 232"]),
        KeywordGroup::new("Defense Production Act", &["defense production act"]),
        KeywordGroup::new("Trade Agreement", &["trade agreement"]),
    ]
}
