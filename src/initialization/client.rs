//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{DetectorConfig, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client shared by page and feed fetches.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Overall timeout from the config (connection and read)
/// - TCP connect timeout, capped at the overall timeout
/// - Redirects disabled, so the fetcher can follow exactly one hop itself
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &DetectorConfig) -> Result<reqwest::Client, reqwest::Error> {
    let timeout = config.timeout();
    let connect_timeout = Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS).min(timeout);
    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()
}
