//! Detection with a Wappalyzer-format ruleset loaded from disk.
//!
//! Writes a small technologies directory plus `categories.json` into a temp
//! directory, loads it with `RulesetMatcher::from_path`, and runs the detector
//! against mock pages.

mod helpers;

use std::path::{Path, PathBuf};

use cms_detect::{Provenance, RulesetMatcher};
use helpers::{create_detector, mount_page};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WORDPRESS: &str = r#"{
    "WordPress": {
        "cats": [1, 11],
        "website": "https://wordpress.org",
        "meta": {"generator": "^WordPress ?([\\d.]+)?\\;version:\\1"},
        "html": "<link rel=[\"']stylesheet[\"'] [^>]+/wp-(?:content|includes)/",
        "implies": "PHP"
    }
}"#;

const SERVER_SIDE: &str = r#"{
    "PHP": {
        "cats": [27],
        "headers": {"X-Powered-By": "^php/?([\\d.]+)?\\;version:\\1"}
    },
    "Drupal": {
        "cats": [1],
        "headers": {"X-Generator": "^Drupal(?:\\s([\\d.]+))?\\;version:\\1"},
        "excludes": "WordPress"
    }
}"#;

const CATEGORIES: &str = r#"{
    "1": {"name": "CMS", "priority": 1},
    "11": {"name": "Blogs", "priority": 1},
    "27": {"name": "Programming languages", "priority": 5}
}"#;

/// Lays out `<tmp>/technologies/{w,s}.json` and `<tmp>/categories.json`.
fn write_ruleset(root: &Path) -> PathBuf {
    let technologies = root.join("technologies");
    std::fs::create_dir_all(&technologies).expect("Failed to create technologies dir");
    std::fs::write(technologies.join("w.json"), WORDPRESS).expect("Failed to write w.json");
    std::fs::write(technologies.join("s.json"), SERVER_SIDE).expect("Failed to write s.json");
    std::fs::write(root.join("categories.json"), CATEGORIES)
        .expect("Failed to write categories.json");
    technologies
}

async fn load_matcher(temp_dir: &TempDir) -> RulesetMatcher {
    let technologies = write_ruleset(temp_dir.path());
    RulesetMatcher::from_path(&technologies)
        .await
        .expect("Failed to load ruleset")
}

const WORDPRESS_PAGE: &str = r#"<html><head>
<title>Example Blog</title>
<meta name="generator" content="WordPress 6.4.2">
<link rel="stylesheet" href="/wp-content/themes/twenty/style.css">
</head><body></body></html>"#;

#[tokio::test]
async fn test_ruleset_loads_every_technology() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let matcher = load_matcher(&temp_dir).await;
    assert_eq!(matcher.len(), 3);
}

#[tokio::test]
async fn test_wordpress_detected_with_version_and_implied_php() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let detector = create_detector(load_matcher(&temp_dir).await);

    let server = MockServer::start().await;
    mount_page(&server, "/", WORDPRESS_PAGE).await;

    let result = detector.detect(&server.uri()).await.expect("detection result");
    assert_eq!(result.cms.as_deref(), Some("WordPress"));

    let findings = result.findings.as_slice();
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].app, "WordPress");
    assert_eq!(findings[0].kind, "cms,blogs");
    assert_eq!(findings[0].version.as_deref(), Some("6.4.2"));
    assert_eq!(findings[0].provenance, Provenance::Meta);
    assert!(findings[0].categories.contains("Blogs"));

    assert_eq!(findings[1].app, "PHP");
    assert_eq!(findings[1].kind, "programming-languages");
    assert_eq!(findings[1].provenance, Provenance::Implied);
}

#[tokio::test]
async fn test_header_match_comes_before_meta_match() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let detector = create_detector(load_matcher(&temp_dir).await);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Powered-By", "PHP/8.2.1")
                .set_body_string(WORDPRESS_PAGE),
        )
        .mount(&server)
        .await;

    let result = detector.detect(&server.uri()).await.expect("detection result");
    let apps: Vec<&str> = result.findings.iter().map(|f| f.app.as_str()).collect();
    assert_eq!(apps, vec!["PHP", "WordPress"]);
    assert_eq!(result.findings.as_slice()[0].version.as_deref(), Some("8.2.1"));
    assert_eq!(result.findings.as_slice()[0].provenance, Provenance::Headers);
    assert_eq!(result.cms.as_deref(), Some("WordPress"));
}

#[tokio::test]
async fn test_exclusion_removes_wordpress() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let detector = create_detector(load_matcher(&temp_dir).await);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Generator", "Drupal 10")
                .set_body_string(WORDPRESS_PAGE),
        )
        .mount(&server)
        .await;

    let result = detector.detect(&server.uri()).await.expect("detection result");
    assert_eq!(result.cms.as_deref(), Some("Drupal"));
    assert!(result.findings.iter().all(|f| f.app != "WordPress"));
    // PHP is still implied by the WordPress finding before exclusions run
    assert!(result.findings.iter().any(|f| f.app == "PHP"));
}

#[tokio::test]
async fn test_missing_ruleset_path_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("nope");
    assert!(RulesetMatcher::from_path(&missing).await.is_err());
}
