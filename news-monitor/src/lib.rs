pub mod types;
pub mod config;
pub mod date;
pub mod classifier;
pub mod fetcher;
pub mod parser;
pub mod traits;
pub mod sources;
pub mod pipeline;
pub mod report;
pub mod rss_utils;

pub use types::*;
pub use config::{MissingDatePolicy, MonitorConfig};
pub use classifier::KeywordClassifier;
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use traits::FeedReader;
pub use sources::{HttpFeedReader, StaticFeedReader};
pub use pipeline::ArticlePipeline;
pub use report::ArticleFilter;
