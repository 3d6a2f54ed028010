//! Search feed URL construction.

use url::form_urlencoded::byte_serialize;

/// Builds the search-feed URL for a site and a keyword.
///
/// Exactly one trailing slash is stripped from `url`, then
/// `/?s={keyword}&feed=rss2` is appended. The keyword is form-urlencoded, so
/// plain words pass through unchanged.
///
/// # Examples
///
/// ```
/// use cms_detect::feed::build_feed_query;
///
/// assert_eq!(
///     build_feed_query("http://example.com/", "news"),
///     "http://example.com/?s=news&feed=rss2"
/// );
/// ```
pub fn build_feed_query(url: &str, keyword: &str) -> String {
    let base = url.strip_suffix('/').unwrap_or(url);
    let keyword: String = byte_serialize(keyword.as_bytes()).collect();
    format!("{}/?s={}&feed=rss2", base, keyword)
}
