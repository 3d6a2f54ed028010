// Shared test helpers for detector setup and mock sites.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::time::Duration;

use cms_detect::{CmsDetector, DetectorConfig, Finding, Provenance, SignatureMatcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Matcher that reports fixed findings whenever the page contains a marker.
pub struct StaticMatcher {
    marker: &'static str,
    findings: Vec<Finding>,
}

impl StaticMatcher {
    #[allow(dead_code)] // Used by other test files
    pub fn new(marker: &'static str, findings: Vec<Finding>) -> Self {
        Self { marker, findings }
    }

    /// Reports WordPress (`cms,blogs`) on pages mentioning `wp-content`.
    #[allow(dead_code)]
    pub fn wordpress() -> Self {
        Self::new(
            "wp-content",
            vec![Finding::new("WordPress", "cms,blogs", Provenance::Html)],
        )
    }
}

impl SignatureMatcher for StaticMatcher {
    fn match_page(&self, content: &str, _headers: &HeaderMap, _url: &str) -> Vec<Finding> {
        if content.contains(self.marker) {
            self.findings.clone()
        } else {
            Vec::new()
        }
    }
}

/// Builds a detector with a short timeout around `matcher`.
#[allow(dead_code)]
pub fn create_detector(matcher: impl SignatureMatcher + 'static) -> CmsDetector {
    create_detector_with_config(
        DetectorConfig {
            timeout_seconds: 5,
            ..Default::default()
        },
        matcher,
    )
}

#[allow(dead_code)]
pub fn create_detector_with_config(
    config: DetectorConfig,
    matcher: impl SignatureMatcher + 'static,
) -> CmsDetector {
    CmsDetector::new(config, Arc::new(matcher)).expect("Failed to build detector")
}

/// Mounts an HTML page at `page_path` on `server`.
#[allow(dead_code)]
pub async fn mount_page(server: &MockServer, page_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html; charset=UTF-8")
                .set_body_string(html),
        )
        .mount(server)
        .await;
}

/// A blog front page carrying a WordPress marker and a meta description.
#[allow(dead_code)]
pub fn blog_page(description: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Example Blog</title>
  <meta name="description" content="{}">
  <link rel="stylesheet" href="/wp-content/themes/twenty/style.css">
</head>
<body><h1>Latest posts</h1></body>
</html>"#,
        description
    )
}

/// An RSS 2.0 document with one item per `(title, description, link)`.
#[allow(dead_code)]
pub fn rss_feed(items: &[(&str, &str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(title, description, link)| {
            format!(
                "<item><title>{}</title><description>{}</description><link>{}</link></item>",
                title, description, link
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Search results</title>{}</channel></rss>"#,
        items
    )
}

/// Feed response with an RSS content type.
#[allow(dead_code)]
pub fn feed_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "application/rss+xml; charset=UTF-8")
        .set_body_string(body)
}

/// Short-timeout client for talking to a locally spawned service.
#[allow(dead_code)]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to build client")
}
