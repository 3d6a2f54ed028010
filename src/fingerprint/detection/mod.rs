//! Ruleset-backed technology detection.
//!
//! `RulesetMatcher` compiles a Wappalyzer-format `Ruleset` once and matches it
//! against pages. Checks run stage by stage in a fixed order (URL, headers,
//! meta, script sources, HTML); a technology is reported once, with the
//! provenance of the earliest stage that matched it.

mod body;
mod headers;
mod utils;

use reqwest::header::HeaderMap;
use scraper::Html;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::Path;

use crate::error_handling::RulesetError;
use crate::fingerprint::models::{Finding, Provenance, Ruleset, Technology};
use crate::fingerprint::patterns::{Pattern, PatternMatch};
use crate::fingerprint::ruleset::load_ruleset;
use crate::fingerprint::SignatureMatcher;

use body::{check_html, check_meta, check_scripts, check_url};
use headers::check_headers;
use utils::{extract_meta_tags, extract_script_sources, normalize_headers_to_map};

/// Stages in match order.
const STAGES: [Provenance; 5] = [
    Provenance::Url,
    Provenance::Headers,
    Provenance::Meta,
    Provenance::Script,
    Provenance::Html,
];

/// A technology with its patterns compiled and its categories resolved.
#[derive(Debug, Clone)]
pub(crate) struct CompiledTechnology {
    name: String,
    kind: String,
    categories: BTreeSet<String>,
    headers: Vec<(String, Vec<Pattern>)>,
    meta: Vec<(String, Vec<Pattern>)>,
    script: Vec<Pattern>,
    html: Vec<Pattern>,
    url: Vec<Pattern>,
    implies: Vec<String>,
    excludes: Vec<String>,
}

impl CompiledTechnology {
    fn compile(name: &str, tech: &Technology, categories: &HashMap<u32, String>) -> Self {
        let category_names: Vec<&String> =
            tech.cats.iter().filter_map(|id| categories.get(id)).collect();
        let kind = category_names
            .iter()
            .map(|name| category_tag(name))
            .collect::<Vec<_>>()
            .join(",");

        let mut headers: Vec<(String, Vec<Pattern>)> = tech
            .headers
            .iter()
            .map(|(header, raw)| (header.to_lowercase(), compile_all([raw.as_str()])))
            .filter(|(_, patterns)| !patterns.is_empty())
            .collect();
        headers.sort_by(|a, b| a.0.cmp(&b.0));

        let mut meta: Vec<(String, Vec<Pattern>)> = tech
            .meta
            .iter()
            .map(|(key, raws)| (key.to_lowercase(), compile_all(raws.iter().map(String::as_str))))
            .filter(|(_, patterns)| !patterns.is_empty())
            .collect();
        meta.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            name: name.to_string(),
            kind,
            categories: category_names.into_iter().cloned().collect(),
            headers,
            meta,
            script: compile_all(tech.script.iter().map(String::as_str)),
            html: compile_all(tech.html.iter().map(String::as_str)),
            url: compile_all(tech.url.iter().map(String::as_str)),
            implies: tech.implies.iter().map(|raw| strip_tags(raw)).collect(),
            excludes: tech.excludes.iter().map(|raw| strip_tags(raw)).collect(),
        }
    }

    fn check(&self, stage: Provenance, page: &PageData<'_>) -> PatternMatch {
        match stage {
            Provenance::Url => check_url(self, page.url),
            Provenance::Headers => check_headers(self, &page.headers),
            Provenance::Meta => check_meta(self, &page.meta_tags),
            Provenance::Script => check_scripts(self, &page.script_sources),
            Provenance::Html => check_html(self, page.html),
            Provenance::Implied => PatternMatch::default(),
        }
    }

    fn finding(&self, provenance: Provenance) -> Finding {
        Finding::new(&self.name, &self.kind, provenance)
    }
}

/// Everything the stages look at, extracted once per page.
struct PageData<'a> {
    url: &'a str,
    html: &'a str,
    headers: HashMap<String, String>,
    meta_tags: HashMap<String, Vec<String>>,
    script_sources: Vec<String>,
}

impl<'a> PageData<'a> {
    fn extract(content: &'a str, headers: &HeaderMap, url: &'a str) -> Self {
        let document = Html::parse_document(content);
        Self {
            url,
            html: content,
            headers: normalize_headers_to_map(headers),
            meta_tags: extract_meta_tags(&document),
            script_sources: extract_script_sources(&document),
        }
    }
}

/// Lowercases a category name and replaces spaces with `-` (`Page builders` -> `page-builders`).
fn category_tag(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Drops `\;confidence:..` style tags from an implies/excludes entry.
fn strip_tags(raw: &str) -> String {
    raw.split("\\;").next().unwrap_or_default().trim().to_string()
}

fn compile_all<'a>(raws: impl IntoIterator<Item = &'a str>) -> Vec<Pattern> {
    raws.into_iter().filter_map(Pattern::parse).collect()
}

/// Signature matcher backed by a Wappalyzer-format ruleset.
#[derive(Debug, Clone)]
pub struct RulesetMatcher {
    technologies: BTreeMap<String, CompiledTechnology>,
}

impl RulesetMatcher {
    /// Compiles every technology in `ruleset`. Patterns that fail to compile are dropped.
    pub fn new(ruleset: &Ruleset) -> Self {
        let technologies = ruleset
            .technologies
            .iter()
            .map(|(name, tech)| {
                (
                    name.clone(),
                    CompiledTechnology::compile(name, tech, &ruleset.categories),
                )
            })
            .collect();
        Self { technologies }
    }

    /// Loads a ruleset from a JSON file or directory and compiles it.
    ///
    /// # Errors
    ///
    /// Returns `RulesetError` if the ruleset cannot be read or parsed.
    pub async fn from_path(path: &Path) -> Result<Self, RulesetError> {
        let ruleset = load_ruleset(path).await?;
        Ok(Self::new(&ruleset))
    }

    /// Number of technologies in the compiled ruleset.
    pub fn len(&self) -> usize {
        self.technologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }
}

impl SignatureMatcher for RulesetMatcher {
    fn match_page(&self, content: &str, headers: &HeaderMap, url: &str) -> Vec<Finding> {
        let page = PageData::extract(content, headers, url);

        let mut findings: Vec<Finding> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for stage in STAGES {
            for (name, tech) in &self.technologies {
                let result = tech.check(stage, &page);
                if !result.matched {
                    continue;
                }
                match positions.get(name.as_str()) {
                    Some(&index) => {
                        // Already found earlier; a later stage may still supply the version
                        if findings[index].version.is_none() {
                            findings[index].version = result.version;
                        }
                    }
                    None => {
                        log::debug!("Detected {} via {} on {}", name, stage, url);
                        positions.insert(name.as_str(), findings.len());
                        findings.push(tech.finding(stage).with_version(result.version));
                    }
                }
            }
        }

        findings
    }

    fn implied_by(&self, finding: &Finding) -> Vec<Finding> {
        let Some(start) = self.technologies.get(&finding.app) else {
            return Vec::new();
        };

        let mut seen: HashSet<&str> = HashSet::from([start.name.as_str()]);
        let mut queue: VecDeque<&CompiledTechnology> = VecDeque::from([start]);
        let mut implied = Vec::new();

        while let Some(tech) = queue.pop_front() {
            for name in &tech.implies {
                let Some(next) = self.technologies.get(name) else {
                    log::debug!("{} implies unknown technology {}", tech.name, name);
                    continue;
                };
                if seen.insert(next.name.as_str()) {
                    implied.push(next.finding(Provenance::Implied));
                    queue.push_back(next);
                }
            }
        }

        implied
    }

    fn excluded_by(&self, finding: &Finding) -> Vec<String> {
        self.technologies
            .get(&finding.app)
            .map(|tech| tech.excludes.clone())
            .unwrap_or_default()
    }

    fn categories_of(&self, finding: &Finding) -> BTreeSet<String> {
        self.technologies
            .get(&finding.app)
            .map(|tech| tech.categories.clone())
            .unwrap_or_default()
    }
}
