//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Processing statistics tracking (errors, warnings, info metrics)
//!
//! Counted conditions are categorized into:
//! - **Errors**: Failures that leave a pipeline stage without a value
//! - **Warnings**: Missing optional data that doesn't prevent a result
//! - **Info**: Informational metrics (redirects, ineligible URLs, etc.)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, categorize_status, update_error_stats};
pub use stats::ProcessingStats;
pub use types::{ErrorType, FeedError, InfoType, InitializationError, RulesetError, WarningType};
