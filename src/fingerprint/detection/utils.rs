//! Page data extraction for technology detection.
//!
//! Pulls the pieces the matcher looks at out of the response: a lowercase
//! header map, meta tags keyed by attribute kind, and script sources.

use reqwest::header::HeaderMap;
use scraper::Html;
use std::collections::HashMap;

use crate::utils::parse_selector_with_fallback;

/// Converts HTTP headers to a map keyed by lowercase header name.
///
/// Repeated headers are joined with `, ` so every value stays visible to patterns.
pub(crate) fn normalize_headers_to_map(headers: &HeaderMap) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        map.entry(name.as_str().to_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    map
}

/// Extracts meta tags as `prefix:name -> [content, ...]`.
///
/// The prefix is `name`, `property` or `http-equiv`, whichever attribute the tag uses.
/// Names are lowercased; content values keep their case.
pub(crate) fn extract_meta_tags(document: &Html) -> HashMap<String, Vec<String>> {
    let mut meta_tags: HashMap<String, Vec<String>> = HashMap::new();
    let selector = parse_selector_with_fallback("meta[content]", "meta tag extraction");

    for element in document.select(&selector) {
        let element = element.value();
        let Some(content) = element.attr("content") else {
            continue;
        };
        for attr in ["name", "property", "http-equiv"] {
            if let Some(key) = element.attr(attr) {
                meta_tags
                    .entry(format!("{}:{}", attr, key.to_lowercase()))
                    .or_default()
                    .push(content.to_string());
            }
        }
    }

    meta_tags
}

/// Extracts the `src` of every `<script>` tag in document order.
pub(crate) fn extract_script_sources(document: &Html) -> Vec<String> {
    let selector = parse_selector_with_fallback("script[src]", "script tag extraction");
    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .map(str::to_string)
        .collect()
}
