//! Timestamp normalization.
//!
//! Feeds publish dates in several textual styles. Every timestamp is brought
//! into UTC, the one canonical zone used for the recency filter and for
//! calendar-date filtering. Text without zone information is read as UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

/// Stand-in for "infinitely old". Always falls outside any lookback window.
pub const OLDEST: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

#[derive(Debug, Clone, Copy)]
enum DateFormat {
    /// `Tue, 10 Jun 2025 14:03:00 +0000`, including the RFC 2822 zone names.
    Rfc2822,
    /// RFC 2822 layout ending in a zone abbreviation chrono does not know.
    NamedZone(&'static str),
    /// `2025-06-10T14:03:00Z`, `2025-06-10T14:03:00.123+02:00`
    Rfc3339,
    /// A layout carrying a numeric offset.
    WithOffset(&'static str),
    /// A layout without zone information, read as UTC.
    Naive(&'static str),
    /// A bare calendar date, read as midnight UTC.
    DateOnly(&'static str),
}

/// Tried in order; the first layout that parses wins.
const FORMATS: &[DateFormat] = &[
    DateFormat::Rfc2822,
    DateFormat::NamedZone("%a, %d %b %Y %H:%M:%S"),
    DateFormat::NamedZone("%d %b %Y %H:%M:%S"),
    DateFormat::NamedZone("%a, %d %b %Y %H:%M"),
    DateFormat::Rfc3339,
    DateFormat::WithOffset("%Y-%m-%dT%H:%M:%S%.f%z"),
    DateFormat::WithOffset("%Y-%m-%d %H:%M:%S%.f%z"),
    DateFormat::WithOffset("%a, %d %b %Y %H:%M:%S %z"),
    DateFormat::Naive("%Y-%m-%dT%H:%M:%S%.f"),
    DateFormat::Naive("%Y-%m-%d %H:%M:%S%.f"),
    DateFormat::Naive("%Y-%m-%dT%H:%M"),
    DateFormat::Naive("%Y-%m-%d %H:%M"),
    DateFormat::Naive("%a, %d %b %Y %H:%M:%S"),
    DateFormat::DateOnly("%Y-%m-%d"),
];

impl DateFormat {
    fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        match *self {
            DateFormat::Rfc2822 => DateTime::parse_from_rfc2822(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            DateFormat::NamedZone(layout) => {
                let (local, zone) = text.rsplit_once(' ')?;
                let offset = zone_offset(zone)?;
                let naive = NaiveDateTime::parse_from_str(local.trim(), layout).ok()?;
                offset
                    .from_local_datetime(&naive)
                    .single()
                    .map(|dt| dt.with_timezone(&Utc))
            }
            DateFormat::Rfc3339 => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            DateFormat::WithOffset(layout) => DateTime::parse_from_str(text, layout)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            DateFormat::Naive(layout) => NaiveDateTime::parse_from_str(text, layout)
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive)),
            DateFormat::DateOnly(layout) => NaiveDate::parse_from_str(text, layout)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive)),
        }
    }
}

/// Offsets for zone abbreviations seen in news feeds.
fn zone_offset(zone: &str) -> Option<FixedOffset> {
    let hours = match zone.to_ascii_uppercase().as_str() {
        "Z" | "UT" | "UTC" | "GMT" => 0,
        "BST" | "CET" => 1,
        "CEST" | "EET" => 2,
        "EEST" => 3,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        _ => return None,
    };
    FixedOffset::east_opt(hours * 3600)
}

/// Parse a feed timestamp into UTC, or `None` when no known layout fits.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    FORMATS.iter().find_map(|format| format.parse(text))
}

/// Total timestamp normalization.
///
/// Absent or unparseable text yields `fallback` when one is given and
/// [`OLDEST`] otherwise. Never fails.
pub fn normalize(raw: Option<&str>, fallback: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match raw.and_then(parse_timestamp) {
        Some(dt) => dt,
        None => {
            debug!("Unusable published time {:?}, falling back", raw);
            fallback.unwrap_or(OLDEST)
        }
    }
}
