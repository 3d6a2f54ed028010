//! cms_detect library: CMS fingerprinting and search-feed discovery
//!
//! Given a URL, this library fetches the page (following at most one redirect),
//! matches it against technology signatures, reduces the findings to a single
//! CMS identity, extracts search keywords from the page, and reads sample items
//! from the platform's search feed.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use cms_detect::{CmsDetector, DetectorConfig, RulesetMatcher};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let matcher = RulesetMatcher::from_path(Path::new("fingerprints/technologies")).await?;
//! let detector = CmsDetector::new(DetectorConfig::default(), Arc::new(matcher))?;
//!
//! if let Some(report) = detector.report("http://blog.example.com").await {
//!     println!("{} runs {:?}", report.url, report.cms);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
mod detector;
pub mod error_handling;
pub mod feed;
pub mod fetch;
pub mod fingerprint;
pub mod initialization;
pub mod parse;
pub mod resolve;
pub mod server;
mod utils;

// Re-export public API
pub use config::{DetectorConfig, KeywordOptions, LogFormat, LogLevel};
pub use detector::{ClientReport, CmsDetector, DetectionResult};
pub use error_handling::ProcessingStats;
pub use feed::TestItem;
pub use fingerprint::{Finding, FindingsSet, Provenance, RulesetMatcher, SignatureMatcher};
