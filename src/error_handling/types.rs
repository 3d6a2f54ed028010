//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the detector.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// An include/exclude URL pattern did not compile.
    #[error("Invalid URL filter pattern '{pattern}': {source}")]
    UrlFilterError {
        /// The offending pattern
        pattern: String,
        /// Regex compilation error
        source: regex::Error,
    },
}

/// Error types for loading a fingerprint ruleset.
#[derive(Error, Debug)]
pub enum RulesetError {
    /// The ruleset file or directory could not be read.
    #[error("Failed to read ruleset {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The ruleset JSON did not match the technology schema.
    #[error("Failed to parse ruleset {path}: {source}")]
    Parse {
        /// Path that failed
        path: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

/// Error types for feed parsing.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The feed is not well-formed XML.
    #[error("Malformed feed XML at byte {position}: {source}")]
    Xml {
        /// Byte offset reported by the reader
        position: u64,
        /// Underlying reader error
        source: quick_xml::Error,
    },
}

/// Types of errors that can occur while fetching and decoding pages and feeds.
///
/// This enum categorizes actual error conditions - failures that leave a
/// pipeline stage without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    HttpRequestBuilderError,
    HttpRequestRedirectError,
    HttpRequestStatusError,
    HttpRequestTimeoutError,
    HttpRequestRequestError,
    HttpRequestConnectError,
    HttpRequestBodyError,
    HttpRequestOtherError,
    HttpRequestBotDetectionError, // 403 Forbidden - typically bot detection
    HttpRequestNotFound,          // 404 Not Found
    HttpRequestServerError,       // any 5xx
    ResponseTooLarge,
    // Content errors
    ContentDecodeError,
    // Feed errors
    FeedFetchError,
    FeedParseError,
}

/// Types of warnings that can occur during detection.
///
/// Warnings indicate missing optional data that doesn't prevent a result
/// but is worth tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    MissingMetaDescription,
    MissingTitle,
    NoKeywords,
    NoCmsDetected,
    MalformedFeedItem, // <item> without title, description or link
}

/// Types of informational metrics that can occur during detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    HttpRedirect,        // single hop followed (301, 302, etc.)
    HttpsRedirect,       // HTTP to HTTPS redirect
    CrossOriginRedirect, // served host differs from requested host
    IneligibleUrl,       // rejected by include/exclude policy
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestStatusError => "HTTP request status error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestBotDetectionError => "Bot detection (403 Forbidden)",
            ErrorType::HttpRequestNotFound => "Not Found (404)",
            ErrorType::HttpRequestServerError => "Server error (5xx)",
            ErrorType::ResponseTooLarge => "Response body too large",
            ErrorType::ContentDecodeError => "Content decode error",
            ErrorType::FeedFetchError => "Feed fetch error",
            ErrorType::FeedParseError => "Feed parse error",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingMetaDescription => "Missing meta description",
            WarningType::MissingTitle => "Missing title",
            WarningType::NoKeywords => "No usable keywords",
            WarningType::NoCmsDetected => "No CMS detected",
            WarningType::MalformedFeedItem => "Malformed feed item",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::HttpRedirect => "HTTP redirect",
            InfoType::HttpsRedirect => "HTTP to HTTPS redirect",
            InfoType::CrossOriginRedirect => "Cross-origin redirect",
            InfoType::IneligibleUrl => "Ineligible URL",
        }
    }
}
