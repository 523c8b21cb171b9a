use crate::traits::FeedReader;
use crate::types::{RawEntry, Source};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Feed reader serving fixed entries keyed by source name.
///
/// Sources without registered entries behave like unreachable feeds.
#[derive(Debug, Default, Clone)]
pub struct StaticFeedReader {
    entries: HashMap<String, Vec<RawEntry>>,
}

impl StaticFeedReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, source_name: &str, entries: Vec<RawEntry>) -> Self {
        self.entries
            .entry(source_name.to_string())
            .or_default()
            .extend(entries);
        self
    }
}

#[async_trait]
impl FeedReader for StaticFeedReader {
    fn reader_name(&self) -> String {
        "static".to_string()
    }

    async fn fetch_entries(&self, source: &Source) -> Vec<RawEntry> {
        let entries = self.entries.get(&source.name).cloned().unwrap_or_default();
        debug!("Serving {} static entries for {}", entries.len(), source.name);
        entries
    }
}
