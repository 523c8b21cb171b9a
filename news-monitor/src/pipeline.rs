use crate::classifier::KeywordClassifier;
use crate::config::{MissingDatePolicy, MonitorConfig};
use crate::date;
use crate::traits::FeedReader;
use crate::types::{Article, KeywordGroup, RawEntry, Result, Source};
use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info};

/// Fetch, recency filter, classify and sort, once per run.
///
/// No state survives between runs.
pub struct ArticlePipeline {
    reader: Arc<dyn FeedReader>,
    classifier: KeywordClassifier,
    lookback: Duration,
    missing_date_policy: MissingDatePolicy,
    max_concurrent_fetches: usize,
}

impl ArticlePipeline {
    pub fn new(reader: Arc<dyn FeedReader>, groups: &[KeywordGroup], lookback: Duration) -> Result<Self> {
        Ok(Self {
            reader,
            classifier: KeywordClassifier::new(groups)?,
            lookback,
            missing_date_policy: MissingDatePolicy::default(),
            max_concurrent_fetches: 1,
        })
    }

    pub fn from_config(reader: Arc<dyn FeedReader>, config: &MonitorConfig) -> Result<Self> {
        Ok(Self::new(reader, &config.keyword_groups, config.lookback())?
            .with_missing_date_policy(config.missing_date_policy)
            .with_max_concurrent_fetches(config.fetch.max_concurrent_fetches))
    }

    pub fn with_missing_date_policy(mut self, policy: MissingDatePolicy) -> Self {
        self.missing_date_policy = policy;
        self
    }

    /// Number of sources fetched at once. Result order does not depend on it.
    pub fn with_max_concurrent_fetches(mut self, max_concurrent_fetches: usize) -> Self {
        self.max_concurrent_fetches = max_concurrent_fetches.max(1);
        self
    }

    pub async fn run(&self, sources: &[Source]) -> Vec<Article> {
        self.run_at(sources, Utc::now()).await
    }

    /// Run against an explicit "now". The cutoff is computed once from it.
    pub async fn run_at(&self, sources: &[Source], now: DateTime<Utc>) -> Vec<Article> {
        let cutoff = self.cutoff(now);
        info!(
            "Running pipeline over {} sources with {} keyword groups via {} reader (cutoff {})",
            sources.len(),
            self.classifier.group_count(),
            self.reader.reader_name(),
            cutoff.to_rfc3339()
        );

        // `buffered` yields in source order, which keeps the final sort stable
        // across concurrency settings.
        let reader = &self.reader;
        let fetched: Vec<(&Source, Vec<RawEntry>)> = stream::iter(sources)
            .map(|source| async move { (source, reader.fetch_entries(source).await) })
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await;

        let mut articles = Vec::new();
        for (source, entries) in fetched {
            articles.extend(self.process_entries(source, entries, now));
        }

        articles.sort_by(|a, b| b.published.cmp(&a.published));

        info!("Pipeline produced {} matching articles", articles.len());
        articles
    }

    /// Start of the lookback window. A window reaching past the earliest
    /// representable time starts at [`date::OLDEST`].
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.lookback).unwrap_or(date::OLDEST)
    }

    /// Turn one source's entries into articles, dropping stale and
    /// unclassified entries. Input order is preserved.
    pub fn process_entries(&self, source: &Source, entries: Vec<RawEntry>, now: DateTime<Utc>) -> Vec<Article> {
        let cutoff = self.cutoff(now);
        let fallback = match self.missing_date_policy {
            MissingDatePolicy::Exclude => None,
            MissingDatePolicy::AssumeNow => Some(now),
        };

        let total = entries.len();
        let mut stale = 0;
        let mut articles = Vec::new();

        for entry in entries {
            let published = date::normalize(entry.published.as_deref(), fallback);
            if published < cutoff {
                stale += 1;
                continue;
            }

            let keyword_group = match self.classifier.classify(&entry.combined_text()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            articles.push(Article {
                title: entry.title.unwrap_or_default(),
                summary: entry.summary.unwrap_or_default(),
                link: entry.link.unwrap_or_default(),
                published,
                source: source.name.clone(),
                keyword_group,
            });
        }

        debug!(
            "{}: {} entries, {} outside window, {} matched",
            source.name,
            total,
            stale,
            articles.len()
        );
        articles
    }
}
