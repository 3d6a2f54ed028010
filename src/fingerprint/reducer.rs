//! Post-processing of raw findings.
//!
//! Raw matcher output is reduced in a fixed order: implied findings are
//! appended, duplicates collapsed, excluded findings dropped, and categories
//! attached. The CMS identity is then the first finding with a CMS type.

use serde::Serialize;
use std::collections::HashSet;

use crate::config::CMS_TYPES;
use crate::fingerprint::models::Finding;
use crate::fingerprint::SignatureMatcher;

/// Appends the findings each finding implies.
///
/// One pass over the input: implied findings are appended after all of the
/// original ones and are not expanded again here.
pub fn follow_implies(findings: Vec<Finding>, matcher: &dyn SignatureMatcher) -> Vec<Finding> {
    let implied: Vec<Finding> = findings
        .iter()
        .flat_map(|finding| matcher.implied_by(finding))
        .collect();
    let mut expanded = findings;
    expanded.extend(implied);
    expanded
}

/// Collapses findings with the same app and type, keeping the first occurrence.
pub fn remove_duplicates(findings: Vec<Finding>) -> Vec<Finding> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    findings
        .into_iter()
        .filter(|finding| seen.insert((finding.app.clone(), finding.kind.clone())))
        .collect()
}

/// Drops findings excluded by another finding in the set.
///
/// Exclusions are computed from the input set as a whole, so an excluded
/// finding's own exclusions still apply. A finding never excludes itself.
pub fn remove_exclusions(findings: Vec<Finding>, matcher: &dyn SignatureMatcher) -> Vec<Finding> {
    let excluded: HashSet<String> = findings
        .iter()
        .flat_map(|finding| {
            matcher
                .excluded_by(finding)
                .into_iter()
                .filter(move |app| app != &finding.app)
        })
        .collect();

    findings
        .into_iter()
        .filter(|finding| {
            let keep = !excluded.contains(&finding.app);
            if !keep {
                log::debug!("Removing {} (excluded by another finding)", finding.app);
            }
            keep
        })
        .collect()
}

/// Attaches each finding's category names.
pub fn add_categories(findings: Vec<Finding>, matcher: &dyn SignatureMatcher) -> Vec<Finding> {
    findings
        .into_iter()
        .map(|mut finding| {
            finding.categories = matcher.categories_of(&finding);
            finding
        })
        .collect()
}

/// Returns the app of the first finding whose type is exactly a CMS type.
pub fn select_cms(findings: &[Finding]) -> Option<String> {
    findings
        .iter()
        .find(|finding| CMS_TYPES.contains(&finding.kind.as_str()))
        .map(|finding| finding.app.clone())
}

/// Reduced findings: implied findings added, duplicates and exclusions removed,
/// categories attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FindingsSet(Vec<Finding>);

impl FindingsSet {
    pub fn as_slice(&self) -> &[Finding] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.0.iter()
    }

    /// Returns the app of the first finding whose type is exactly a CMS type.
    pub fn cms(&self) -> Option<String> {
        select_cms(&self.0)
    }

    pub fn into_inner(self) -> Vec<Finding> {
        self.0
    }
}

impl<'a> IntoIterator for &'a FindingsSet {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Runs the full reduction over raw matcher output.
pub fn reduce_findings(raw: Vec<Finding>, matcher: &dyn SignatureMatcher) -> FindingsSet {
    let findings = follow_implies(raw, matcher);
    let findings = remove_duplicates(findings);
    let findings = remove_exclusions(findings, matcher);
    FindingsSet(add_categories(findings, matcher))
}
