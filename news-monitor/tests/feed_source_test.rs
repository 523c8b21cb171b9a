use chrono::{TimeZone, Utc};
use news_monitor::date::parse_timestamp;
use news_monitor::{
    ArticlePipeline, FeedParser, FeedReader, FetchConfig, HttpFeedReader, MonitorConfig,
    MonitorError, Result, Source, StaticFeedReader,
};
use std::sync::Arc;

mod common;

const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Energy Wire</title>
    <link>https://energy.example.com</link>
    <description>Energy news</description>
    <item>
      <title>DOE announces uranium enrichment contracts</title>
      <link>https://energy.example.com/doe-contracts</link>
      <description>Awards aim to rebuild domestic supply.</description>
      <pubDate>Tue, 10 Jun 2025 09:30:00 GMT</pubDate>
    </item>
    <item>
      <title>Grid operators brace for heat wave</title>
      <link>https://energy.example.com/heat-wave</link>
    </item>
  </channel>
</rss>"#;

const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Policy Desk</title>
  <id>urn:uuid:60a76c80-d399-11d9-b93c-0003939e0af6</id>
  <updated>2025-06-10T10:00:00Z</updated>
  <entry>
    <title>Section 232 review expanded</title>
    <link href="https://policy.example.com/section-232"/>
    <id>urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a</id>
    <published>2025-06-10T08:15:00+02:00</published>
    <updated>2025-06-10T08:15:00+02:00</updated>
    <summary>Commerce widens the probe.</summary>
  </entry>
</feed>"#;

#[test]
fn test_parse_rss_entries() -> Result<()> {
    common::init_tracing();

    let entries = FeedParser::parse_entries(RSS_SAMPLE)?;

    assert_eq!(entries.len(), 2);

    let first = &entries[0];
    assert_eq!(first.title.as_deref(), Some("DOE announces uranium enrichment contracts"));
    assert_eq!(first.link.as_deref(), Some("https://energy.example.com/doe-contracts"));
    assert_eq!(first.summary.as_deref(), Some("Awards aim to rebuild domestic supply."));
    let published = first.published.as_deref().and_then(parse_timestamp);
    assert_eq!(published, Some(Utc.with_ymd_and_hms(2025, 6, 10, 9, 30, 0).unwrap()));

    let second = &entries[1];
    assert_eq!(second.title.as_deref(), Some("Grid operators brace for heat wave"));
    assert_eq!(second.summary, None);
    assert_eq!(second.published, None);
    Ok(())
}

#[test]
fn test_parse_atom_entries() -> Result<()> {
    let entries = FeedParser::parse_entries(ATOM_SAMPLE)?;

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.title.as_deref(), Some("Section 232 review expanded"));
    assert_eq!(entry.link.as_deref(), Some("https://policy.example.com/section-232"));
    assert_eq!(entry.summary.as_deref(), Some("Commerce widens the probe."));
    let published = entry.published.as_deref().and_then(parse_timestamp);
    assert_eq!(published, Some(Utc.with_ymd_and_hms(2025, 6, 10, 6, 15, 0).unwrap()));
    Ok(())
}

#[test]
fn test_malformed_content_is_a_parse_error() {
    let result = FeedParser::parse_entries("<html><body>Service unavailable</body></html>");
    assert!(matches!(result, Err(MonitorError::Parse(_))));

    let result = FeedParser::parse_entries("");
    assert!(matches!(result, Err(MonitorError::Parse(_))));
}

#[test]
fn test_feed_content_detection() {
    assert!(FeedParser::is_valid_feed_content(RSS_SAMPLE));
    assert!(FeedParser::is_valid_feed_content(ATOM_SAMPLE));
    assert!(!FeedParser::is_valid_feed_content("<html><body>Not a feed</body></html>"));
    assert!(!FeedParser::is_valid_feed_content("plain text"));
}

#[tokio::test]
async fn test_http_reader_isolates_connection_failure() -> Result<()> {
    common::init_tracing();

    let reader = HttpFeedReader::new(FetchConfig {
        timeout_seconds: 5,
        ..FetchConfig::default()
    })?;
    // Port 9 (discard) is not served locally, so the connection is refused
    let source = Source::new("Unreachable", "http://127.0.0.1:9/rss.xml");

    let entries = reader.fetch_entries(&source).await;

    assert!(entries.is_empty());
    assert_eq!(reader.reader_name(), "http");
    Ok(())
}

#[tokio::test]
async fn test_parsed_feed_through_pipeline() -> Result<()> {
    let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
    let source = Source::new("Energy Wire", "https://energy.example.com/rss");

    let reader = StaticFeedReader::new()
        .with_entries(&source.name, FeedParser::parse_entries(RSS_SAMPLE)?);
    let pipeline = ArticlePipeline::from_config(Arc::new(reader), &MonitorConfig::default())?;

    let articles = pipeline.run_at(&[source], now).await;

    // The undated heat-wave item is dropped; the DOE item hits the phrase group
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].keyword_group, "Uranium Enrichment");
    assert_eq!(articles[0].link, "https://energy.example.com/doe-contracts");
    Ok(())
}

const ZONED_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Euro Desk</title>
    <link>https://euro.example.com</link>
    <description>European energy news</description>
    <item>
      <title>Fusion pilot plant sited in Bavaria</title>
      <link>https://euro.example.com/fusion-pilot</link>
      <pubDate>Tue, 10 Jun 2025 10:00:00 CET</pubDate>
    </item>
    <item>
      <title>NRC staff visit Brussels</title>
      <link>https://euro.example.com/nrc-visit</link>
      <pubDate>2025-06-10 10:30:00</pubDate>
    </item>
  </channel>
</rss>"#;

#[test]
fn test_named_zone_and_naive_pub_dates() -> Result<()> {
    let entries = FeedParser::parse_entries(ZONED_RSS)?;

    assert_eq!(entries.len(), 2);
    let cet = entries[0].published.as_deref().and_then(parse_timestamp);
    assert_eq!(cet, Some(Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap()));
    let naive = entries[1].published.as_deref().and_then(parse_timestamp);
    assert_eq!(naive, Some(Utc.with_ymd_and_hms(2025, 6, 10, 10, 30, 0).unwrap()));
    Ok(())
}

#[tokio::test]
async fn test_named_zone_entries_survive_default_policy() -> Result<()> {
    let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
    let source = Source::new("Euro Desk", "https://euro.example.com/rss");

    let reader = StaticFeedReader::new()
        .with_entries(&source.name, FeedParser::parse_entries(ZONED_RSS)?);
    let pipeline = ArticlePipeline::from_config(Arc::new(reader), &MonitorConfig::default())?;

    let articles = pipeline.run_at(&[source], now).await;

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].keyword_group, "NRC");
    assert_eq!(articles[0].published, Utc.with_ymd_and_hms(2025, 6, 10, 10, 30, 0).unwrap());
    assert_eq!(articles[1].keyword_group, "Fusion");
    assert_eq!(articles[1].published, Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap());
    Ok(())
}
