//! Endpoint records
//!
//! An endpoint is one plugin or theme update feed entry: an identifier, the
//! readme-style text an administrator authored for it, a lifecycle status and
//! the list of origins allowed to receive pending updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an endpoint entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    #[default]
    Draft,
    /// Visible as information only, except to whitelisted test origins
    Pending,
    Publish,
    Trash,
}

impl EndpointStatus {
    /// Whether entries with this status are served at all
    pub fn is_visible(&self) -> bool {
        matches!(self, EndpointStatus::Pending | EndpointStatus::Publish)
    }
}

impl fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EndpointStatus::Draft => "draft",
            EndpointStatus::Pending => "pending",
            EndpointStatus::Publish => "publish",
            EndpointStatus::Trash => "trash",
        };
        write!(f, "{}", s)
    }
}

/// What kind of component an endpoint serves updates for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    #[default]
    Plugin,
    Theme,
}

impl ComponentKind {
    /// Slug derivation: a plugin's slug is the directory of its identifier
    /// (`my-plugin/my-plugin.php` -> `my-plugin`), a theme's is the identifier.
    pub fn slug_for(&self, identifier: &str) -> String {
        match self {
            ComponentKind::Plugin => match identifier.rsplit_once('/') {
                Some((dir, _)) => dir.to_string(),
                None => ".".to_string(),
            },
            ComponentKind::Theme => identifier.to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Plugin => "plugin",
            ComponentKind::Theme => "theme",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plugin" => Ok(ComponentKind::Plugin),
            "theme" => Ok(ComponentKind::Theme),
            other => anyhow::bail!("Unknown component kind: {}", other),
        }
    }
}

/// Parsed notification targets for an endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationTargets {
    pub emails: Vec<String>,
    pub urls: Vec<String>,
}

impl NotificationTargets {
    /// Parse a comma-separated list; entries starting with `http` are URLs,
    /// everything else is treated as an email address.
    pub fn parse(raw: &str) -> Self {
        let mut targets = Self::default();
        for target in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if target.starts_with("http") {
                targets.urls.push(target.to_string());
            } else {
                targets.emails.push(target.to_string());
            }
        }
        targets
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.urls.is_empty()
    }
}

/// Normalize an origin for whitelist comparison
pub fn normalize_origin(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Split the stored newline-separated test URL list into clean origins
pub fn parse_test_urls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            line.trim_matches(|c: char| c == '/' || c.is_whitespace())
                .replace(' ', "")
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// One plugin or theme endpoint as held by the content store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointRecord {
    /// `folder/file.php` for plugins, the theme slug for themes
    pub identifier: String,

    #[serde(default)]
    pub kind: ComponentKind,

    #[serde(default)]
    pub status: EndpointStatus,

    /// Newline-separated origins allowed to receive pending updates
    #[serde(default)]
    pub test_urls: String,

    /// Comma-separated emails/URLs shown to testers for feedback
    #[serde(default)]
    pub notifications: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_installs: Option<u64>,

    /// Readme-style text body
    #[serde(skip)]
    pub body: String,
}

impl EndpointRecord {
    /// Create a new draft record stamped with the current time
    pub fn new(identifier: impl Into<String>, kind: ComponentKind, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            identifier: identifier.into(),
            kind,
            status: EndpointStatus::Draft,
            test_urls: String::new(),
            notifications: String::new(),
            created: now,
            modified: now,
            active_installs: None,
            body: body.into(),
        }
    }

    pub fn with_status(mut self, status: EndpointStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_test_urls(mut self, urls: &[&str]) -> Self {
        self.test_urls = urls.join("\n");
        self
    }

    pub fn with_notifications(mut self, targets: impl Into<String>) -> Self {
        self.notifications = targets.into();
        self
    }

    /// Origins allowed to receive this endpoint's pending updates
    pub fn allowed_test_urls(&self) -> Vec<String> {
        parse_test_urls(&self.test_urls)
    }

    /// Whether `origin` is on this endpoint's test whitelist
    pub fn is_whitelisted(&self, origin: &str) -> bool {
        let origin = normalize_origin(origin);
        !origin.is_empty() && self.allowed_test_urls().iter().any(|u| *u == origin)
    }

    pub fn notification_targets(&self) -> NotificationTargets {
        NotificationTargets::parse(&self.notifications)
    }

    pub fn is_pending(&self) -> bool {
        self.status == EndpointStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_for_plugin_and_theme() {
        assert_eq!(ComponentKind::Plugin.slug_for("my-plugin/my-plugin.php"), "my-plugin");
        assert_eq!(ComponentKind::Plugin.slug_for("hello.php"), ".");
        assert_eq!(ComponentKind::Theme.slug_for("my-theme"), "my-theme");
    }

    #[test]
    fn test_status_visibility() {
        assert!(EndpointStatus::Pending.is_visible());
        assert!(EndpointStatus::Publish.is_visible());
        assert!(!EndpointStatus::Draft.is_visible());
        assert!(!EndpointStatus::Trash.is_visible());
    }

    #[test]
    fn test_parse_test_urls_cleans_entries() {
        let urls = parse_test_urls("https://a.com/\n\n  https://b .com  \r\n/");
        assert_eq!(urls, vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_whitelist_ignores_trailing_slash() {
        let record = EndpointRecord::new("p/p.php", ComponentKind::Plugin, "")
            .with_test_urls(&["https://allowed.com"]);
        assert!(record.is_whitelisted("https://allowed.com/"));
        assert!(record.is_whitelisted("https://allowed.com"));
        assert!(!record.is_whitelisted("https://other.com"));
        assert!(!record.is_whitelisted(""));
    }

    #[test]
    fn test_notification_targets() {
        let targets = NotificationTargets::parse(" a@x.com, https://x.com/issues ,, b@y.com");
        assert_eq!(targets.emails, vec!["a@x.com", "b@y.com"]);
        assert_eq!(targets.urls, vec!["https://x.com/issues"]);
        assert!(NotificationTargets::parse("").is_empty());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Theme".parse::<ComponentKind>().unwrap(), ComponentKind::Theme);
        assert!("widget".parse::<ComponentKind>().is_err());
    }
}
