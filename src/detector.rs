//! Detection orchestration.
//!
//! `CmsDetector` owns the HTTP client, the signature matcher, the configuration
//! and the processing counters, and runs the pipeline:
//!
//! 1. Prepare the URL and check it against the include/exclude policy
//! 2. Fetch it, following at most one redirect
//! 3. Check the served URL against the policy again and normalize it
//! 4. Decode the body, match signatures, reduce the findings
//! 5. Extract keywords
//!
//! The serving-boundary report then builds a search-feed URL from the first
//! keyword and reads test items from it.

use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;

use crate::config::{DetectorConfig, MAX_HTML_PREVIEW_CHARS};
use crate::error_handling::{ErrorType, InfoType, InitializationError, ProcessingStats, WarningType};
use crate::feed::{build_feed_query, fetch_feed_items, TestItem};
use crate::fetch::{decode_content, fetch_page};
use crate::fingerprint::{reduce_findings, FindingsSet, SignatureMatcher};
use crate::initialization::init_client;
use crate::parse::extract_keywords;
use crate::resolve::{normalize_url, prepare_url};

/// Outcome of a successful detection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    /// Normalized URL of the page that was actually served
    pub url: String,
    /// Reduced findings in match order
    pub findings: FindingsSet,
    /// Candidate search keywords in document order
    pub keywords: Vec<String>,
    /// App of the first finding with a CMS type
    pub cms: Option<String>,
}

/// Payload returned to portal clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientReport {
    pub url: String,
    pub item_for_test: Vec<TestItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cms: Option<String>,
}

/// Detects the platform behind a page and finds sample content for it.
///
/// Cheap to clone; clones share the client, matcher and counters.
#[derive(Clone)]
pub struct CmsDetector {
    client: reqwest::Client,
    matcher: Arc<dyn SignatureMatcher>,
    config: Arc<DetectorConfig>,
    stats: Arc<ProcessingStats>,
}

impl CmsDetector {
    /// Creates a detector with its own HTTP client and fresh counters.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(
        config: DetectorConfig,
        matcher: Arc<dyn SignatureMatcher>,
    ) -> Result<Self, InitializationError> {
        Self::with_stats(config, matcher, Arc::new(ProcessingStats::new()))
    }

    /// Creates a detector that records into existing counters.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn with_stats(
        config: DetectorConfig,
        matcher: Arc<dyn SignatureMatcher>,
        stats: Arc<ProcessingStats>,
    ) -> Result<Self, InitializationError> {
        let client = init_client(&config)?;
        Ok(Self {
            client,
            matcher,
            config: Arc::new(config),
            stats,
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Counters shared by every clone of this detector.
    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    fn is_eligible(&self, url: &str) -> bool {
        let eligible = self.config.url_filter.is_eligible(url);
        if !eligible {
            info!("Skipping ineligible URL {}", url);
            self.stats.increment_info(InfoType::IneligibleUrl);
        }
        eligible
    }

    /// Runs detection for a single URL.
    ///
    /// Returns `None` when the URL is invalid or ineligible (before or after the
    /// redirect), unreachable, or its content cannot be decoded. No request is
    /// made for a URL that fails the policy.
    pub async fn detect(&self, url: &str) -> Option<DetectionResult> {
        info!("- {}", url);
        // Policy applies to the input as given and to its prepared form
        if !self.is_eligible(url.trim()) {
            return None;
        }
        let requested = prepare_url(url)?;
        if !self.is_eligible(&requested) {
            return None;
        }

        let page = fetch_page(&self.client, &requested, &self.stats).await?;
        if page.was_redirected() {
            info!("` {}", page.final_url);
            if !self.is_eligible(&page.final_url) {
                return None;
            }
        }
        let url = normalize_url(&page.final_url)?;

        let Some(content) = decode_content(&page.body) else {
            debug!("Could not decode content of {}", url);
            self.stats.increment_error(ErrorType::ContentDecodeError);
            return None;
        };
        debug!(
            "Decoded {} chars from {}: {}",
            content.len(),
            url,
            content.chars().take(MAX_HTML_PREVIEW_CHARS).collect::<String>()
        );

        let raw = self.matcher.match_page(&content, &page.headers, &url);
        let findings = reduce_findings(raw, self.matcher.as_ref());
        let keywords = extract_keywords(&content, &self.config.keywords, &self.stats);

        let cms = findings.cms();
        match &cms {
            Some(app) => debug!("CMS for {}: {}", url, app),
            None => {
                debug!("No CMS detected for {}", url);
                self.stats.increment_warning(WarningType::NoCmsDetected);
            }
        }

        Some(DetectionResult {
            url,
            findings,
            keywords,
            cms,
        })
    }

    /// Reads test items from the site's search feed for `keyword`.
    pub async fn find_items_for_client_test(&self, url: &str, keyword: &str) -> Vec<TestItem> {
        let feed_url = build_feed_query(url, keyword);
        debug!("Fetching search feed {}", feed_url);
        fetch_feed_items(
            &self.client,
            &feed_url,
            self.config.feed_item_limit,
            &self.stats,
        )
        .await
    }

    /// Runs detection and, if a keyword was found, reads test items for the first one.
    ///
    /// Returns `None` wherever `detect` does. Without a keyword no feed is requested
    /// and `item_for_test` is empty.
    pub async fn report(&self, url: &str) -> Option<ClientReport> {
        let result = self.detect(url).await?;
        let item_for_test = match result.keywords.first() {
            Some(keyword) => self.find_items_for_client_test(&result.url, keyword).await,
            None => Vec::new(),
        };
        Some(ClientReport {
            url: result.url,
            item_for_test,
            cms: result.cms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{Finding, Provenance};
    use crate::resolve::UrlFilter;
    use reqwest::header::HeaderMap;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Reports a fixed CMS whenever the page mentions its marker.
    struct MarkerMatcher;

    impl SignatureMatcher for MarkerMatcher {
        fn match_page(&self, content: &str, _headers: &HeaderMap, _url: &str) -> Vec<Finding> {
            if content.contains("wp-content") {
                vec![Finding::new("WordPress", "cms,blogs", Provenance::Html)]
            } else {
                Vec::new()
            }
        }
    }

    fn detector(config: DetectorConfig) -> CmsDetector {
        CmsDetector::new(config, Arc::new(MarkerMatcher)).expect("detector should build")
    }

    #[tokio::test]
    async fn test_detect_finds_cms_and_keywords() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><head><meta name="description" content="Daily garden notes">
                <link rel="stylesheet" href="/wp-content/style.css"></head></html>"#,
            ))
            .mount(&server)
            .await;

        let result = detector(DetectorConfig::default())
            .detect(&server.uri())
            .await
            .expect("detection result");
        assert_eq!(result.url, format!("{}/", server.uri()));
        assert_eq!(result.cms.as_deref(), Some("WordPress"));
        assert_eq!(result.keywords, vec!["Daily", "garden", "notes"]);
        assert_eq!(result.findings.len(), 1);
    }

    #[tokio::test]
    async fn test_detect_without_cms_counts_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<title>Static site</title>"))
            .mount(&server)
            .await;

        let detector = detector(DetectorConfig::default());
        let result = detector.detect(&server.uri()).await.expect("detection result");
        assert_eq!(result.cms, None);
        assert!(result.findings.is_empty());
        assert_eq!(
            detector.stats().get_warning_count(WarningType::NoCmsDetected),
            1
        );
    }

    #[tokio::test]
    async fn test_detect_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0x00]))
            .mount(&server)
            .await;

        let detector = detector(DetectorConfig::default());
        assert!(detector.detect(&server.uri()).await.is_none());
        assert_eq!(
            detector.stats().get_error_count(ErrorType::ContentDecodeError),
            1
        );
    }

    #[tokio::test]
    async fn test_detect_ineligible_url_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = DetectorConfig {
            url_filter: UrlFilter::new(Some(r"\.example\.org"), None).expect("valid filter"),
            ..Default::default()
        };
        let detector = detector(config);
        assert!(detector.detect(&server.uri()).await.is_none());
        assert_eq!(detector.stats().get_info_count(InfoType::IneligibleUrl), 1);
    }

    #[tokio::test]
    async fn test_detect_rejects_invalid_input() {
        let detector = detector(DetectorConfig::default());
        assert!(detector.detect("   ").await.is_none());
        assert!(detector.detect("ftp://example.com/").await.is_none());
    }

    #[tokio::test]
    async fn test_report_without_keywords_skips_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<p>/wp-content/ but no words</p>"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let report = detector(DetectorConfig::default())
            .report(&server.uri())
            .await
            .expect("report");
        assert!(report.item_for_test.is_empty());
        assert_eq!(report.cms.as_deref(), Some("WordPress"));
    }

    #[test]
    fn test_client_report_serialization() {
        let report = ClientReport {
            url: "http://example.com/".to_string(),
            item_for_test: vec![TestItem {
                title: "t".to_string(),
                description: "d".to_string(),
                link: "http://example.com/t".to_string(),
            }],
            cms: None,
        };
        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["url"], "http://example.com/");
        assert_eq!(value["item_for_test"][0]["link"], "http://example.com/t");
        assert!(value.get("cms").is_none());
    }
}
