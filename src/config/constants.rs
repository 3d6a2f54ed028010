//! Configuration constants.
//!
//! This module defines the defaults used throughout the detector: timeouts,
//! size limits, keyword and feed limits.

/// Page and feed fetch timeout in seconds.
/// Kept short so a single slow origin cannot stall the serving layer.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// TCP connection timeout in seconds.
/// Never longer than the overall request timeout.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Number of `<item>` elements read from a search feed.
pub const DEFAULT_FEED_ITEM_LIMIT: usize = 3;

/// Number of keywords kept from the page description or title.
pub const DEFAULT_KEYWORD_COUNT: usize = 3;

/// Minimum keyword length in characters (words must be strictly longer than 3).
pub const DEFAULT_MIN_KEYWORD_LEN: usize = 4;

/// Maximum number of redirect hops followed before the served page is read.
pub const MAX_REDIRECT_HOPS: usize = 1;

/// Default port of the portal HTTP service.
pub const DEFAULT_SERVICE_PORT: u16 = 4900;

/// Maximum URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Responses larger than this are skipped to prevent memory exhaustion
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum HTML preview length in characters for debug logging
pub const MAX_HTML_PREVIEW_CHARS: usize = 200;

/// Finding types that identify a content-management system.
pub const CMS_TYPES: &[&str] = &["cms", "cms,blogs"];
