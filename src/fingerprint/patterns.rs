//! Pattern matching utilities for technology detection.
//!
//! This module supports Wappalyzer pattern syntax:
//! - A case-insensitive regular expression (an empty one matches anything)
//! - Optional tags after `\;`, e.g. `\;version:\1` or `\;confidence:50`
//! - Version templates with back-references (`\1`) and ternaries (`\1?yes:no`)

use regex::{Captures, Regex, RegexBuilder};
use std::collections::HashMap;

/// A compiled Wappalyzer pattern.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    regex: Regex,
    version: Option<String>,
}

/// Result of matching a pattern against a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PatternMatch {
    pub(crate) matched: bool,
    pub(crate) version: Option<String>,
}

impl PatternMatch {
    fn miss() -> Self {
        Self::default()
    }
}

impl Pattern {
    /// Compiles a raw pattern. Returns `None` (after logging) when the regex does not compile.
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split("\\;");
        let expr = parts.next().unwrap_or_default();

        // Only the version tag affects matching; confidence is ignored
        let version = parts.find_map(|tag| tag.strip_prefix("version:").map(str::to_string));

        match RegexBuilder::new(expr)
            .case_insensitive(true)
            .size_limit(1 << 20)
            .build()
        {
            Ok(regex) => Some(Self { regex, version }),
            Err(e) => {
                log::debug!("Skipping pattern '{}': {}", raw, e);
                None
            }
        }
    }

    /// Matches the pattern against `text`, resolving the version template if present.
    pub(crate) fn matches(&self, text: &str) -> PatternMatch {
        let Some(caps) = self.regex.captures(text) else {
            return PatternMatch::miss();
        };
        let version = self
            .version
            .as_deref()
            .and_then(|template| resolve_version(template, &caps));
        PatternMatch {
            matched: true,
            version,
        }
    }
}

/// Expands a version template against regex captures.
///
/// Higher group numbers are substituted first so `\1` never eats the prefix of `\10`.
fn resolve_version(template: &str, caps: &Captures<'_>) -> Option<String> {
    let mut version = template.to_string();
    for index in (1..caps.len()).rev() {
        let value = caps.get(index).map(|m| m.as_str()).unwrap_or_default();
        let marker = format!("\\{}", index);

        let ternary = format!("{}?", marker);
        if let Some(pos) = version.find(&ternary) {
            let rest = &version[pos + ternary.len()..];
            if let Some((yes, no)) = rest.split_once(':') {
                let chosen = if value.is_empty() { no } else { yes };
                version = format!("{}{}", &version[..pos], chosen);
            }
        }

        version = version.replace(&marker, value);
    }

    let version = version.trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Runs each pattern against each value and returns the first match.
///
/// A match carrying a version wins over an earlier match without one.
pub(crate) fn first_match<'a, I>(patterns: &[Pattern], values: I) -> PatternMatch
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let mut found = PatternMatch::miss();
    for pattern in patterns {
        for value in values.clone() {
            let result = pattern.matches(value);
            if result.matched {
                if result.version.is_some() {
                    return result;
                }
                found.matched = true;
            }
        }
    }
    found
}

/// Checks meta tag patterns against extracted meta tags.
///
/// Keys may be prefixed (`property:og:site_name`, `http-equiv:x-generator`).
/// A bare key such as `generator` is tried as `name:`, `property:` and
/// `http-equiv:` in that order.
///
/// `meta_tags` maps `prefix:name` (lowercase) to every `content` value seen.
pub(crate) fn check_meta_patterns(
    meta_key: &str,
    patterns: &[Pattern],
    meta_tags: &HashMap<String, Vec<String>>,
) -> PatternMatch {
    let meta_key = meta_key.to_lowercase();

    let candidates: Vec<String> =
        if meta_key.starts_with("property:") || meta_key.starts_with("http-equiv:") {
            vec![meta_key]
        } else {
            ["name", "property", "http-equiv"]
                .iter()
                .map(|prefix| format!("{}:{}", prefix, meta_key))
                .collect()
        };

    let mut found = PatternMatch::miss();
    for key in &candidates {
        if let Some(values) = meta_tags.get(key) {
            let result = first_match(patterns, values.iter().map(String::as_str));
            if result.version.is_some() {
                return result;
            }
            found.matched |= result.matched;
        }
    }
    found
}
