//! Context fetchers for the fresh-context service

pub mod github;
pub mod rss;

pub use github::GitHubActivityFetcher;
pub use rss::RssFeedFetcher;
