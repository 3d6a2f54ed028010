//! Error categorization.
//!
//! Maps transport failures and non-success statuses onto `ErrorType` so the
//! fetch stages can count them without surfacing the error itself.

use reqwest::StatusCode;

use super::stats::ProcessingStats;
use super::types::ErrorType;

/// Categorizes a non-success HTTP status into an `ErrorType`.
pub fn categorize_status(status: StatusCode) -> ErrorType {
    match status.as_u16() {
        403 => ErrorType::HttpRequestBotDetectionError,
        404 => ErrorType::HttpRequestNotFound,
        300..=399 => ErrorType::HttpRequestRedirectError,
        _ if status.is_server_error() => ErrorType::HttpRequestServerError,
        _ => ErrorType::HttpRequestStatusError,
    }
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Status codes are checked first, then the reqwest error kind.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return categorize_status(status);
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() || error.is_decode() {
        ErrorType::HttpRequestBodyError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Updates processing statistics based on a `reqwest::Error`.
pub fn update_error_stats(stats: &ProcessingStats, error: &reqwest::Error) {
    stats.increment_error(categorize_reqwest_error(error));
}
