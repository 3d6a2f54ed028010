//! CSS selector parsing utilities.

use scraper::Selector;

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches nothing
/// (`*:not(*)`). This prevents panics while allowing the code to continue.
///
/// # Arguments
///
/// * `selector_str` - The CSS selector string to parse
/// * `context` - Context description for error logging (e.g., "meta tag extraction")
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        #[allow(clippy::expect_used)]
        Selector::parse("*:not(*)").expect(
            "Fallback selector '*:not(*)' should always parse - this is a programming error",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_valid_selector_matches() {
        let selector = parse_selector_with_fallback("meta[name='description']", "test");
        let doc = Html::parse_document(r#"<meta name="description" content="x">"#);
        assert_eq!(doc.select(&selector).count(), 1);
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let selector = parse_selector_with_fallback("meta[[[", "test");
        let doc = Html::parse_document(r#"<meta name="description" content="x">"#);
        assert_eq!(doc.select(&selector).count(), 0);
    }
}
