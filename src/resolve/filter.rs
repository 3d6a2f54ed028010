//! URL eligibility policy.

use regex::Regex;

use crate::error_handling::InitializationError;

/// Include/exclude policy deciding which URLs may be fetched at all.
///
/// Both patterns are regular expressions searched anywhere in the URL. With
/// no patterns every URL is eligible.
#[derive(Debug, Clone, Default)]
pub struct UrlFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl UrlFilter {
    /// Compiles an include and/or exclude pattern.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::UrlFilterError` if a pattern does not compile.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self, InitializationError> {
        Ok(Self {
            include: include.map(compile).transpose()?,
            exclude: exclude.map(compile).transpose()?,
        })
    }

    /// Returns `true` if the URL matches the include pattern (when set) and
    /// does not match the exclude pattern (when set).
    pub fn is_eligible(&self, url: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(url) {
                log::debug!("URL {} does not match include pattern {}", url, include);
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(url) {
                log::debug!("URL {} matches exclude pattern {}", url, exclude);
                return false;
            }
        }
        true
    }
}

fn compile(pattern: &str) -> Result<Regex, InitializationError> {
    Regex::new(pattern).map_err(|source| InitializationError::UrlFilterError {
        pattern: pattern.to_string(),
        source,
    })
}
