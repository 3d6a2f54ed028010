//! Single-hop redirect handling.
//!
//! The shared client never follows redirects on its own. This module follows
//! at most `MAX_REDIRECT_HOPS` hops so the served URL is known to the caller,
//! which checks it against the eligibility policy again.

use reqwest::{Response, StatusCode, Url};

use crate::config::MAX_REDIRECT_HOPS;

/// Returns `true` for the redirect statuses that carry a `Location` to follow.
pub(crate) fn is_redirect_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

/// Resolves a `Location` header value against the URL that returned it.
///
/// Absolute locations are used as-is, relative ones are joined onto `base`.
pub(crate) fn resolve_location(base: &str, location: &str) -> Option<Url> {
    Url::parse(location)
        .or_else(|_| Url::parse(base).and_then(|base| base.join(location)))
        .ok()
}

/// Sends a GET request, following at most `MAX_REDIRECT_HOPS` redirects.
///
/// The returned response is whatever the last request produced. When the hop
/// budget is spent on a redirect that points further, that redirect response is
/// returned unchanged; callers treat it as a non-success status, which rejects
/// deeper chains.
///
/// # Errors
///
/// Returns the transport error of whichever request failed.
pub(crate) async fn send_following_one_redirect(
    client: &reqwest::Client,
    url: &str,
) -> Result<Response, reqwest::Error> {
    let mut current = url.to_string();
    let mut response = client.get(&current).send().await?;

    for _ in 0..MAX_REDIRECT_HOPS {
        let status = response.status();
        if !is_redirect_status(status) {
            break;
        }

        let Some(location) = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
        else {
            log::warn!(
                "Redirect status {} for {} but no usable Location header",
                status.as_u16(),
                current
            );
            break;
        };

        let Some(next) = resolve_location(&current, location) else {
            log::warn!(
                "Redirect from {} has unparsable Location '{}'",
                current,
                location
            );
            break;
        };

        log::debug!("Following redirect {} -> {}", current, next);
        current = next.to_string();
        response = client.get(next).send().await?;
    }

    Ok(response)
}
