//! Technology fingerprinting.
//!
//! This module provides:
//! - The `SignatureMatcher` seam the detector calls into
//! - `RulesetMatcher`, a matcher backed by a Wappalyzer-format ruleset
//! - The findings reducer (implies, duplicates, exclusions, categories, CMS selection)

mod detection;
mod models;
mod patterns;
pub mod reducer;
mod ruleset;

use reqwest::header::HeaderMap;
use std::collections::BTreeSet;

pub use detection::RulesetMatcher;
pub use models::{Finding, Provenance, Ruleset, Technology};
pub use reducer::{reduce_findings, select_cms, FindingsSet};
pub use ruleset::load_ruleset;

/// Matches page content against technology signatures.
///
/// Implementations must be shareable across concurrent detections. The lookup
/// methods default to "nothing", which suits matchers without rule metadata.
pub trait SignatureMatcher: Send + Sync {
    /// Returns raw findings for a page, in match order.
    ///
    /// `content` is the decoded page, `headers` the response headers of the
    /// served page, and `url` its normalized URL.
    fn match_page(&self, content: &str, headers: &HeaderMap, url: &str) -> Vec<Finding>;

    /// Findings implied by `finding`. Whether this is transitive is up to the matcher.
    fn implied_by(&self, _finding: &Finding) -> Vec<Finding> {
        Vec::new()
    }

    /// Apps that `finding` invalidates when both are present.
    fn excluded_by(&self, _finding: &Finding) -> Vec<String> {
        Vec::new()
    }

    /// Category names for `finding`.
    fn categories_of(&self, _finding: &Finding) -> BTreeSet<String> {
        BTreeSet::new()
    }
}
