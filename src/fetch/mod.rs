//! Page fetching.
//!
//! Every failure here (transport error, timeout, non-success status, oversized
//! body) is logged, counted, and turned into `None`: an unreachable page is a
//! final outcome, not an error to propagate.

mod decode;
mod redirects;

use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::{
    categorize_status, update_error_stats, ErrorType, InfoType, ProcessingStats,
};
use crate::resolve::is_cross_origin;

pub use decode::decode_content;

/// A fetched page: where it was requested, where it was served from, and what came back.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL passed to the fetcher
    pub requested_url: String,
    /// URL of the response actually read (differs after a redirect)
    pub final_url: String,
    /// Response status (always a success status)
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Vec<u8>,
}

impl Page {
    /// Returns `true` if the page was served from a different URL than requested.
    pub fn was_redirected(&self) -> bool {
        self.requested_url != self.final_url
    }
}

/// Fetches a URL with the shared client, following at most one redirect.
///
/// The timeout is the one configured on `client` (see `init_client`) and covers
/// connection and body read. Returns `None` on any transport failure,
/// non-success status, or a body larger than `MAX_RESPONSE_BODY_SIZE`.
pub async fn fetch_page(
    client: &reqwest::Client,
    url: &str,
    stats: &ProcessingStats,
) -> Option<Page> {
    let response = match redirects::send_following_one_redirect(client, url).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Failed to fetch {}: {}", url, e);
            update_error_stats(stats, &e);
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!("Fetching {} returned status {}", url, status);
        stats.increment_error(categorize_status(status));
        return None;
    }

    let final_url = response.url().to_string();
    if final_url != url {
        stats.increment_info(InfoType::HttpRedirect);
        if url.starts_with("http://") && final_url.starts_with("https://") {
            stats.increment_info(InfoType::HttpsRedirect);
        }
        if is_cross_origin(url, &final_url) {
            stats.increment_info(InfoType::CrossOriginRedirect);
        }
    }

    if let Some(length) = response.content_length() {
        if length > MAX_RESPONSE_BODY_SIZE as u64 {
            debug!("Skipping large body for {}: {} bytes declared", url, length);
            stats.increment_error(ErrorType::ResponseTooLarge);
            return None;
        }
    }

    let headers = response.headers().clone();
    let body = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read response body for {}: {}", url, e);
            update_error_stats(stats, &e);
            return None;
        }
    };
    if body.len() > MAX_RESPONSE_BODY_SIZE {
        debug!("Skipping large body for {}: {} bytes", url, body.len());
        stats.increment_error(ErrorType::ResponseTooLarge);
        return None;
    }

    debug!(
        "Fetched {} ({} bytes, status {}, served from {})",
        url,
        body.len(),
        status,
        final_url
    );

    Some(Page {
        requested_url: url.to_string(),
        final_url,
        status,
        headers,
        body: body.to_vec(),
    })
}
