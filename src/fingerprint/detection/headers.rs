//! Header-based technology detection.

use std::collections::HashMap;

use crate::fingerprint::patterns::{first_match, PatternMatch};

use super::CompiledTechnology;

/// Matches a technology's header patterns against the normalized header map.
///
/// Any one header matching is enough; a header with an empty pattern only needs
/// to be present.
pub(super) fn check_headers(
    tech: &CompiledTechnology,
    headers: &HashMap<String, String>,
) -> PatternMatch {
    let mut found = PatternMatch::default();
    for (header_name, patterns) in &tech.headers {
        let Some(value) = headers.get(header_name) else {
            continue;
        };
        let result = first_match(patterns, [value.as_str()]);
        if result.version.is_some() {
            return result;
        }
        found.matched |= result.matched;
    }
    found
}
