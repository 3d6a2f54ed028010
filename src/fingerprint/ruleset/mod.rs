//! Fingerprint ruleset loading.
//!
//! This module handles:
//! - Loading technologies from a local JSON file or directory
//! - Loading the category table from categories.json

mod categories;
mod local;

use std::path::Path;

use crate::error_handling::RulesetError;
use crate::fingerprint::models::Ruleset;

use categories::load_categories_from_path;
use local::load_from_path;

const CATEGORIES_FILE: &str = "categories.json";

/// Loads a Wappalyzer-format ruleset from a file or directory.
///
/// # Errors
///
/// Returns `RulesetError` if the technologies (or an existing categories.json)
/// cannot be read or parsed.
pub async fn load_ruleset(path: &Path) -> Result<Ruleset, RulesetError> {
    let technologies = load_from_path(path).await?;
    let categories = load_categories_from_path(path).await?;

    log::info!(
        "Loaded {} technologies from {}",
        technologies.len(),
        path.display()
    );

    Ok(Ruleset {
        technologies,
        categories,
    })
}
