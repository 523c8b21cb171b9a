use crate::types::{RawEntry, Source};
use async_trait::async_trait;

/// Trait for retrieving the entries currently published by a feed source
#[async_trait]
pub trait FeedReader: Send + Sync {
    /// Human-readable name for this reader, used in logs
    fn reader_name(&self) -> String;

    /// Fetch and parse the entries of `source`.
    ///
    /// Infallible by contract: a source that cannot be reached, does not
    /// parse, or has no entries yields an empty list.
    async fn fetch_entries(&self, source: &Source) -> Vec<RawEntry>;
}
