//! URL validation and normalization utilities.

use log::warn;
use url::Url;

use crate::config::MAX_URL_LENGTH;

/// Prepares caller input for the pipeline.
///
/// Trims whitespace, rejects input longer than `MAX_URL_LENGTH`, adds an
/// `http://` prefix when no scheme is given, then normalizes.
pub fn prepare_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            trimmed.len(),
            MAX_URL_LENGTH,
            trimmed.chars().take(50).collect::<String>()
        );
        return None;
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    normalize_url(&with_scheme)
}

/// Canonicalizes a URL so string comparisons and feed construction are stable.
///
/// Scheme and host are lower-cased, default ports are dropped, a bare host
/// gets a single `/` path and the fragment is removed. Returns `None` for
/// unparsable URLs and for schemes other than http/https.
///
/// Normalizing an already normalized URL returns it unchanged.
pub fn normalize_url(url: &str) -> Option<String> {
    let mut parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Skipping invalid URL {}: {}", url, e);
            return None;
        }
    };

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            warn!("Skipping unsupported scheme '{}' for URL: {}", other, url);
            return None;
        }
    }
    if parsed.host_str().is_none() {
        warn!("Skipping URL without host: {}", url);
        return None;
    }

    parsed.set_fragment(None);
    Some(parsed.to_string())
}

/// Returns `true` when two URLs point at different hosts or schemes.
pub fn is_cross_origin(requested: &str, served: &str) -> bool {
    match (Url::parse(requested), Url::parse(served)) {
        (Ok(a), Ok(b)) => a.origin() != b.origin(),
        _ => requested != served,
    }
}
