pub mod http_feed;
pub mod static_feed;

pub use http_feed::HttpFeedReader;
pub use static_feed::StaticFeedReader;
