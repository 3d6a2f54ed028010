//! Category loading for fingerprint rulesets.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error_handling::RulesetError;
use crate::fingerprint::models::CategoryEntry;

use super::CATEGORIES_FILE;

/// Returns the places `categories.json` may live for a ruleset path.
///
/// For a file: next to it. For a directory: its parent first (the Wappalyzer
/// `src/technologies` + `src/categories.json` layout), then the directory itself.
fn candidate_paths(path: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if path.is_dir() {
        if let Some(parent) = path.parent() {
            candidates.push(parent.join(CATEGORIES_FILE));
        }
        candidates.push(path.join(CATEGORIES_FILE));
    } else if let Some(parent) = path.parent() {
        candidates.push(parent.join(CATEGORIES_FILE));
    }
    candidates
}

/// Loads categories.json for a ruleset path.
///
/// A missing file is not an error: findings then carry no categories and an
/// empty type. A present but malformed file is.
pub(crate) async fn load_categories_from_path(
    path: &Path,
) -> Result<HashMap<u32, String>, RulesetError> {
    let Some(categories_path) = candidate_paths(path).into_iter().find(|p| p.is_file()) else {
        log::warn!(
            "No {} found for {}; findings will have no categories",
            CATEGORIES_FILE,
            path.display()
        );
        return Ok(HashMap::new());
    };

    let content = fs::read_to_string(&categories_path)
        .await
        .map_err(|source| RulesetError::Io {
            path: categories_path.display().to_string(),
            source,
        })?;
    let entries: HashMap<String, CategoryEntry> =
        serde_json::from_str(&content).map_err(|source| RulesetError::Parse {
            path: categories_path.display().to_string(),
            source,
        })?;

    let result: HashMap<u32, String> = entries
        .into_iter()
        .filter_map(|(id, entry)| id.parse::<u32>().ok().map(|id| (id, entry.into_name())))
        .collect();

    log::info!(
        "Loaded {} categories from {}",
        result.len(),
        categories_path.display()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_categories_next_to_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let tech_path = temp_dir.path().join("technologies.json");
        tokio::fs::write(&tech_path, b"{}").await.expect("write");
        tokio::fs::write(
            temp_dir.path().join(CATEGORIES_FILE),
            r#"{"1": {"name": "CMS", "priority": 1}, "11": "Blogs", "x": "ignored"}"#,
        )
        .await
        .expect("write");

        let categories = load_categories_from_path(&tech_path).await.expect("load");
        assert_eq!(categories.len(), 2);
        assert_eq!(categories.get(&1).map(String::as_str), Some("CMS"));
        assert_eq!(categories.get(&11).map(String::as_str), Some("Blogs"));
    }

    #[tokio::test]
    async fn test_categories_in_parent_of_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let tech_dir = temp_dir.path().join("technologies");
        tokio::fs::create_dir(&tech_dir).await.expect("mkdir");
        tokio::fs::write(temp_dir.path().join(CATEGORIES_FILE), r#"{"1": "CMS"}"#)
            .await
            .expect("write");

        let categories = load_categories_from_path(&tech_dir).await.expect("load");
        assert_eq!(categories.get(&1).map(String::as_str), Some("CMS"));
    }

    #[tokio::test]
    async fn test_missing_categories_is_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let tech_path = temp_dir.path().join("technologies.json");
        let categories = load_categories_from_path(&tech_path).await.expect("load");
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_categories_is_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let tech_path = temp_dir.path().join("technologies.json");
        tokio::fs::write(temp_dir.path().join(CATEGORIES_FILE), b"[1, 2]")
            .await
            .expect("write");
        let result = load_categories_from_path(&tech_path).await;
        assert!(matches!(result, Err(RulesetError::Parse { .. })));
    }
}
