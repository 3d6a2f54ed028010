//! Search feed discovery.
//!
//! Builds a platform search-feed URL from a site and a keyword, fetches it,
//! and turns its first few items into test items. Every failure here is soft:
//! the caller gets an empty list and the reason is logged and counted.

mod parser;
mod query;

use serde::{Deserialize, Serialize};

use crate::error_handling::{ErrorType, ProcessingStats, WarningType};
use crate::fetch::{decode_content, fetch_page};

pub use parser::{parse_feed, ParsedFeed};
pub use query::build_feed_query;

/// One sample content item taken from a search feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestItem {
    pub title: String,
    pub description: String,
    pub link: String,
}

/// Fetches `feed_url` and parses at most `limit` items from it.
///
/// Returns an empty list if the feed cannot be fetched, decoded or parsed.
pub async fn fetch_feed_items(
    client: &reqwest::Client,
    feed_url: &str,
    limit: usize,
    stats: &ProcessingStats,
) -> Vec<TestItem> {
    let Some(page) = fetch_page(client, feed_url, stats).await else {
        stats.increment_error(ErrorType::FeedFetchError);
        return Vec::new();
    };

    let Some(xml) = decode_content(&page.body) else {
        log::warn!("Feed at {} is empty or not valid UTF-8", feed_url);
        stats.increment_error(ErrorType::ContentDecodeError);
        return Vec::new();
    };

    match parse_feed(&xml, limit) {
        Ok(parsed) => {
            for _ in 0..parsed.malformed {
                stats.increment_warning(WarningType::MalformedFeedItem);
            }
            log::debug!(
                "Parsed {} items from {} ({} malformed skipped)",
                parsed.items.len(),
                feed_url,
                parsed.malformed
            );
            parsed.items
        }
        Err(e) => {
            log::warn!("Failed to parse feed {}: {}", feed_url, e);
            stats.increment_error(ErrorType::FeedParseError);
            Vec::new()
        }
    }
}
