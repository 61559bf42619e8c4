//! Parsed and assembled update data
//!
//! `Header` is the per-request header map, `RenderedSections` the rendered
//! section map, and `UpdateRecord` the normalized record returned to callers.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Header properties pulled from `Key: value` lines and the `=== Name ===` title
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub text_domain: Option<String>,
    pub domain_path: Option<String>,
    pub requires_php: Option<String>,
    pub requires: Option<String>,
    pub tested: Option<String>,
    pub author: Option<String>,
    pub author_uri: Option<String>,
    pub plugin_uri: Option<String>,
    pub theme_uri: Option<String>,
    pub download_link: Option<String>,
    pub donate_link: Option<String>,
    pub license: Option<String>,
    pub license_uri: Option<String>,
}

/// Treat missing and empty header values alike
fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Header {
    pub fn name(&self) -> String {
        or_empty(&self.name)
    }

    pub fn version(&self) -> String {
        or_empty(&self.version)
    }

    pub fn requires(&self) -> Option<&str> {
        non_empty(&self.requires)
    }

    /// `<a href="author_uri">author</a>` when both halves are present
    pub fn author_link(&self) -> String {
        match (non_empty(&self.author), non_empty(&self.author_uri)) {
            (Some(author), Some(uri)) => format!("<a href=\"{}\">{}</a>", uri, author),
            _ => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Header::default()
    }
}

/// Rendered section HTML keyed by canonical section name
///
/// Absent sections are `None` and never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_notice: Option<String>,
}

impl RenderedSections {
    fn slots_mut(&mut self) -> [&mut Option<String>; 8] {
        [
            &mut self.description,
            &mut self.faq,
            &mut self.installation,
            &mut self.screenshots,
            &mut self.reviews,
            &mut self.other_notes,
            &mut self.changelog,
            &mut self.upgrade_notice,
        ]
    }

    /// Prefix every present section with `markup`
    pub fn prepend_all(&mut self, markup: &str) {
        for slot in self.slots_mut() {
            if let Some(content) = slot.as_mut() {
                content.insert_str(0, markup);
            }
        }
    }

    pub fn len(&self) -> usize {
        [
            &self.description,
            &self.faq,
            &self.installation,
            &self.screenshots,
            &self.reviews,
            &self.other_notes,
            &self.changelog,
            &self.upgrade_notice,
        ]
        .iter()
        .filter(|s| s.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Banner image URLs for the update modal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banners {
    pub default: String,
    pub low: String,
    pub high: String,
}

/// Icon image URLs for the update list table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icons {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(rename = "1x", skip_serializing_if = "Option::is_none")]
    pub one_x: Option<String>,
    #[serde(rename = "2x", skip_serializing_if = "Option::is_none")]
    pub two_x: Option<String>,
}

impl Icons {
    /// Use the same image at every size
    pub fn uniform(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            default: Some(url.clone()),
            one_x: Some(url.clone()),
            two_x: Some(url),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.one_x.is_none() && self.two_x.is_none()
    }
}

/// The normalized update record served by the detail endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Always true: the component is not hosted by the official directory
    pub external: bool,
    pub identifier: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub text_domain: String,
    pub domain_path: String,
    pub requires_php: String,
    pub requires: String,
    pub tested: String,
    pub author: String,
    pub author_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_uri: Option<String>,
    pub download_link: String,
    pub donate_link: String,
    pub license: String,
    pub license_uri: String,
    pub homepage: String,
    pub last_updated: String,
    pub added: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_installs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banners: Option<Banners>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons: Option<Icons>,
    /// `{requires: true}` when a minimum version is declared
    pub compatibility: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<BTreeMap<usize, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_ratings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    /// Single-line plain excerpt of the upgrade notice for list rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_notice: Option<String>,
    pub sections: RenderedSections,
}

/// Compact update payload returned by the query endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDelta {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub new_version: String,
    pub package: String,
    pub requires: String,
    pub tested: String,
    pub requires_php: String,
    pub updated: String,
    pub upgrade_notice: String,
}

/// Per-identifier query answer: `{}` for no update, the delta otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEntry {
    NoUpdate,
    Update(UpdateDelta),
}

impl QueryEntry {
    pub fn delta(&self) -> Option<&UpdateDelta> {
        match self {
            QueryEntry::NoUpdate => None,
            QueryEntry::Update(delta) => Some(delta),
        }
    }
}

impl Serialize for QueryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryEntry::NoUpdate => serializer.serialize_map(Some(0))?.end(),
            QueryEntry::Update(delta) => delta.serialize(serializer),
        }
    }
}

/// Query endpoint response: identifier -> entry; empty when nothing matched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryResponse(pub BTreeMap<String, QueryEntry>);

impl QueryResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(identifier: impl Into<String>, entry: QueryEntry) -> Self {
        let mut map = BTreeMap::new();
        map.insert(identifier.into(), entry);
        Self(map)
    }

    pub fn get(&self, identifier: &str) -> Option<&QueryEntry> {
        self.0.get(identifier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
