//! Network side of external post ingestion.
//!
//! [`Fetcher`] retrieves feeds (parsed with `feed-rs`) and article pages
//! (parsed with `scraper`). Feed problems come back as [`FeedFailure`] so the
//! caller can skip the source; page problems are ordinary errors.

mod feed;
mod fetcher;
mod page;

pub use feed::{FeedFailure, parse_feed};
pub use fetcher::Fetcher;
pub use page::PageContent;
