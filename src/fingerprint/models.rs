//! Data structures for technology detection.
//!
//! This module contains:
//! - `Finding`: one technology detected on a page
//! - `Provenance`: which part of the page produced a finding
//! - `Technology`: a single Wappalyzer-format fingerprint rule
//! - `Ruleset`: container for all technologies and categories

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Which part of the page produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Url,
    Headers,
    Meta,
    Script,
    Html,
    /// Added because another finding implies it
    Implied,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Url => "url",
            Provenance::Headers => "headers",
            Provenance::Meta => "meta",
            Provenance::Script => "script",
            Provenance::Html => "html",
            Provenance::Implied => "implied",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A technology detected on a page.
///
/// `kind` is the category tag (serialized as `type`), possibly compound such as
/// `cms,blogs`. Two findings are duplicates when they share `app` and `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub app: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    pub provenance: Provenance,
}

impl Finding {
    /// Creates a finding with no version and no categories attached yet.
    pub fn new(app: impl Into<String>, kind: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            app: app.into(),
            kind: kind.into(),
            version: None,
            categories: BTreeSet::new(),
            provenance,
        }
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }
}

/// Technology fingerprint rule structure matching the Wappalyzer schema.
/// The technology name is the key in the JSON, not a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Technology {
    /// Category IDs
    #[serde(default)]
    pub cats: Vec<u32>,
    /// Website URL
    #[serde(default)]
    pub website: String,
    /// Header patterns: header_name -> pattern
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Meta tag patterns: meta_name -> pattern(s)
    /// Meta values can be either a string or an array of strings
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_meta_map")]
    pub meta: HashMap<String, Vec<String>>,
    /// Script source patterns - Wappalyzer uses "scriptSrc"
    #[serde(default)]
    #[serde(alias = "scriptSrc")]
    #[serde(deserialize_with = "deserialize_string_or_array")]
    pub script: Vec<String>,
    /// HTML text patterns (can be string or array)
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_or_array")]
    pub html: Vec<String>,
    /// URL patterns (can be string or array)
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_or_array")]
    pub url: Vec<String>,
    /// Implies other technologies (can be string or array)
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_or_array")]
    pub implies: Vec<String>,
    /// Excludes other technologies (can be string or array)
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_or_array")]
    pub excludes: Vec<String>,
}

/// Deserializes a field that can be either a string or an array of strings
fn deserialize_string_or_array<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct StringOrArrayVisitor;

    impl<'de> Visitor<'de> for StringOrArrayVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or an array of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut values = Vec::new();
            while let Some(elem) = seq.next_element::<String>()? {
                values.push(elem);
            }
            Ok(values)
        }
    }

    deserializer.deserialize_any(StringOrArrayVisitor)
}

/// Deserializes a meta map where values can be either strings or arrays of strings
fn deserialize_meta_map<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, MapAccess, Visitor};

    struct MetaMapVisitor;

    impl<'de> Visitor<'de> for MetaMapVisitor {
        type Value = HashMap<String, Vec<String>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of string to string or array of strings")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut result = HashMap::new();
            while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                let patterns = match value {
                    serde_json::Value::String(s) => vec![s],
                    serde_json::Value::Array(arr) => arr
                        .into_iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect(),
                    _ => {
                        return Err(de::Error::invalid_type(
                            de::Unexpected::Other("expected string or array"),
                            &self,
                        ));
                    }
                };
                result.insert(key, patterns);
            }
            Ok(result)
        }
    }

    deserializer.deserialize_map(MetaMapVisitor)
}

/// Category entry from categories.json.
///
/// Older rule databases store the bare name, newer ones an object; only its `name` is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum CategoryEntry {
    Name(String),
    Detailed { name: String },
}

impl CategoryEntry {
    pub(crate) fn into_name(self) -> String {
        match self {
            CategoryEntry::Name(name) => name,
            CategoryEntry::Detailed { name } => name,
        }
    }
}

/// Fingerprint ruleset container
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    /// Technologies indexed by name, ordered so matching is deterministic
    pub technologies: BTreeMap<String, Technology>,
    /// Categories indexed by ID -> name
    pub categories: HashMap<u32, String>,
}
