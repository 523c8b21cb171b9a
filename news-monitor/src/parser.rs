use crate::date;
use crate::types::{MonitorError, RawEntry, Result};
use feed_rs::parser;
use tracing::debug;

/// Translates feed documents into strictly typed entries.
pub struct FeedParser;

impl FeedParser {
    /// Parse an RSS/Atom/JSON feed body into raw entries, in document order.
    pub fn parse_entries(content: &str) -> Result<Vec<RawEntry>> {
        debug!("Parsing feed content ({} bytes)", content.len());

        // Feed dates go through the normalizer's layouts rather than
        // feed-rs's defaults, which reject zones such as CET.
        let feed = parser::Builder::new()
            .timestamp_parser(date::parse_timestamp)
            .build()
            .parse(content.as_bytes())
            .map_err(|e| MonitorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let entries: Vec<RawEntry> = feed.entries.into_iter().map(Self::raw_entry).collect();

        debug!("Parsed feed with {} entries", entries.len());
        Ok(entries)
    }

    fn raw_entry(entry: feed_rs::model::Entry) -> RawEntry {
        // Already normalized to UTC by `date::parse_timestamp`; RFC 3339 text
        // keeps the field in the same shape every reader produces.
        RawEntry {
            title: entry.title.map(|t| t.content),
            summary: entry.summary.map(|s| s.content),
            link: entry.links.into_iter().next().map(|l| l.href),
            published: entry.published.map(|dt| dt.to_rfc3339()),
        }
    }

    /// Cheap check for RSS/Atom markers before handing content to the parser.
    pub fn is_valid_feed_content(content: &str) -> bool {
        let content_lower = content.to_lowercase();

        content_lower.contains("<rss")
            || content_lower.contains("<feed")
            || content_lower.contains("<rdf:rdf")
            || content_lower.contains("<channel")
            || content.trim_start().starts_with('{')
    }
}
