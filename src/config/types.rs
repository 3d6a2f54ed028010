//! Configuration types.
//!
//! This module defines the logging enums shared with the CLI and the library
//! configuration consumed by the detector.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_FEED_ITEM_LIMIT, DEFAULT_KEYWORD_COUNT, DEFAULT_MIN_KEYWORD_LEN, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use crate::resolve::UrlFilter;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Keyword extraction limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordOptions {
    /// Maximum number of keywords returned
    pub count: usize,
    /// Minimum keyword length in characters
    pub min_len: usize,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_KEYWORD_COUNT,
            min_len: DEFAULT_MIN_KEYWORD_LEN,
        }
    }
}

/// Detector configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use cms_detect::DetectorConfig;
///
/// let config = DetectorConfig {
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// assert_eq!(config.feed_item_limit, 3);
/// ```
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Page and feed fetch timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Include/exclude policy applied to requested and served URLs
    pub url_filter: UrlFilter,

    /// Maximum number of test items read from the search feed
    pub feed_item_limit: usize,

    /// Keyword extraction limits
    pub keywords: KeywordOptions,
}

impl DetectorConfig {
    /// Fetch timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            url_filter: UrlFilter::default(),
            feed_item_limit: DEFAULT_FEED_ITEM_LIMIT,
            keywords: KeywordOptions::default(),
        }
    }
}
