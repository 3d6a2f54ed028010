//! Local file loading operations for fingerprint rulesets.
//!
//! This module handles loading technologies from a single JSON file or a
//! directory of JSON files (the Wappalyzer `technologies/a.json` ... layout).

use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

use crate::error_handling::RulesetError;
use crate::fingerprint::models::Technology;

use super::CATEGORIES_FILE;

fn io_error(path: &Path, source: std::io::Error) -> RulesetError {
    RulesetError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Loads technologies from a local path (handles both single file and directory).
///
/// In directory mode, unreadable or unparsable files are logged and skipped so
/// one broken file does not take down the whole ruleset. A single file must parse.
pub(crate) async fn load_from_path(
    path: &Path,
) -> Result<BTreeMap<String, Technology>, RulesetError> {
    if path.is_dir() {
        let mut all_technologies = BTreeMap::new();
        let mut entries = fs::read_dir(path).await.map_err(|e| io_error(path, e))?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(path, e))? {
            let file_path = entry.path();
            if file_path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if file_path.file_name().and_then(|s| s.to_str()) == Some(CATEGORIES_FILE) {
                continue;
            }
            match fs::read_to_string(&file_path).await {
                Ok(content) => {
                    match serde_json::from_str::<BTreeMap<String, Technology>>(&content) {
                        Ok(techs) => all_technologies.extend(techs),
                        Err(e) => log::warn!("Failed to parse {}: {}", file_path.display(), e),
                    }
                }
                Err(e) => log::warn!("Failed to read {}: {}", file_path.display(), e),
            }
        }

        Ok(all_technologies)
    } else {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| io_error(path, e))?;
        serde_json::from_str(&content).map_err(|source| RulesetError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_from_path_file_not_found() {
        let result = load_from_path(Path::new("nonexistent_file.json")).await;
        assert!(matches!(result, Err(RulesetError::Io { .. })));
    }

    #[tokio::test]
    async fn test_load_from_path_invalid_json() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("invalid.json");
        tokio::fs::write(&file_path, b"{ invalid json }")
            .await
            .expect("Failed to write invalid JSON");

        let result = load_from_path(&file_path).await;
        assert!(matches!(result, Err(RulesetError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_load_from_path_empty_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("empty.json");
        tokio::fs::write(&file_path, b"{}")
            .await
            .expect("Failed to write empty JSON");

        let technologies = load_from_path(&file_path).await.expect("empty ruleset");
        assert!(technologies.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_path_directory_skips_bad_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir_path = temp_dir.path();

        tokio::fs::write(
            dir_path.join("w.json"),
            r#"{"WordPress": {"cats": [1], "website": "https://wordpress.org"}}"#,
        )
        .await
        .expect("Failed to write w.json");
        tokio::fs::write(
            dir_path.join("d.json"),
            r#"{"Drupal": {"cats": [1], "website": "https://drupal.org"}}"#,
        )
        .await
        .expect("Failed to write d.json");
        tokio::fs::write(dir_path.join("broken.json"), b"{ invalid json }")
            .await
            .expect("Failed to write broken.json");
        tokio::fs::write(dir_path.join(CATEGORIES_FILE), r#"{"1": "CMS"}"#)
            .await
            .expect("Failed to write categories.json");
        tokio::fs::write(dir_path.join("readme.txt"), "Not a JSON file")
            .await
            .expect("Failed to write readme.txt");

        let technologies = load_from_path(dir_path).await.expect("directory ruleset");
        assert_eq!(technologies.len(), 2);
        assert!(technologies.contains_key("WordPress"));
        assert!(technologies.contains_key("Drupal"));
    }
}
