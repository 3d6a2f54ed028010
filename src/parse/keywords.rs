//! Keyword extraction.
//!
//! Candidate search keywords come from the page's meta description or, when
//! there is none, its title.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::config::KeywordOptions;
use crate::error_handling::{ProcessingStats, WarningType};
use crate::utils::parse_selector_with_fallback;

static META_DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_with_fallback(
        "meta[name='description'][content]",
        "meta description extraction",
    )
});

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("title", "title extraction"));

/// Returns the `content` of the first `<meta name="description">` tag, if any.
///
/// An empty description still counts as present.
fn extract_meta_description(document: &Html, stats: &ProcessingStats) -> Option<String> {
    let description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string);

    if description.is_none() {
        stats.increment_warning(WarningType::MissingMetaDescription);
    }
    description
}

/// Returns the text of the first `<title>` element, if it has any.
fn extract_title(document: &Html, stats: &ProcessingStats) -> Option<String> {
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>())
        .filter(|title| !title.is_empty());

    if title.is_none() {
        log::debug!("No title element found in document");
        stats.increment_warning(WarningType::MissingTitle);
    }
    title
}

/// Extracts up to `options.count` keywords from a page.
///
/// Words come from the first meta description (commas removed) or, if the page
/// has no description tag at all, from the title. Text is split on single
/// spaces and only words of at least `options.min_len` characters are kept,
/// in document order.
pub fn extract_keywords(
    content: &str,
    options: &KeywordOptions,
    stats: &ProcessingStats,
) -> Vec<String> {
    let document = Html::parse_document(content);

    let source = match extract_meta_description(&document, stats) {
        Some(description) => Some(description.replace(',', "")),
        None => extract_title(&document, stats),
    };

    let keywords: Vec<String> = source
        .as_deref()
        .map(|text| select_keywords(text.split(' '), options))
        .unwrap_or_default();

    if keywords.is_empty() {
        stats.increment_warning(WarningType::NoKeywords);
    }
    keywords
}

fn select_keywords<'a>(
    words: impl Iterator<Item = &'a str>,
    options: &KeywordOptions,
) -> Vec<String> {
    words
        .filter(|word| word.chars().count() >= options.min_len)
        .take(options.count)
        .map(str::to_string)
        .collect()
}
