//! Body-based technology detection.
//!
//! Covers every check that looks at the page itself rather than the response
//! headers: the URL, meta tags, script sources and raw HTML.

use std::collections::HashMap;

use crate::fingerprint::patterns::{check_meta_patterns, first_match, PatternMatch};

use super::CompiledTechnology;

pub(super) fn check_url(tech: &CompiledTechnology, url: &str) -> PatternMatch {
    first_match(&tech.url, [url])
}

pub(super) fn check_meta(
    tech: &CompiledTechnology,
    meta_tags: &HashMap<String, Vec<String>>,
) -> PatternMatch {
    let mut found = PatternMatch::default();
    for (meta_key, patterns) in &tech.meta {
        let result = check_meta_patterns(meta_key, patterns, meta_tags);
        if result.version.is_some() {
            return result;
        }
        found.matched |= result.matched;
    }
    found
}

pub(super) fn check_scripts(tech: &CompiledTechnology, script_sources: &[String]) -> PatternMatch {
    first_match(&tech.script, script_sources.iter().map(String::as_str))
}

pub(super) fn check_html(tech: &CompiledTechnology, html: &str) -> PatternMatch {
    first_match(&tech.html, [html])
}
