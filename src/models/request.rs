//! Request context
//!
//! Everything the pipeline knows about an inbound request is carried in an
//! explicit `RequestContext` passed by parameter.

use super::endpoint::ComponentKind;
use super::record::Banners;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decoded, tag-stripped request data for one update-check or detail call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Which kind of component the caller is asking about
    pub kind: ComponentKind,

    /// The requester's claimed site URL (origin)
    pub site_url: String,

    /// Identifier of the requested component
    pub identifier: String,

    /// Nonce issued for this request's origin
    pub nonce: String,

    /// Versions the remote site reports as installed, by identifier
    #[serde(default)]
    pub remote_versions: BTreeMap<String, String>,

    /// Screenshot URLs supplied by the caller, keyed by 1-based index
    #[serde(default)]
    pub screenshot_urls: BTreeMap<u32, String>,

    /// Banner URLs supplied by the caller (`default`, `low`, `high`)
    #[serde(default)]
    pub banner_urls: BTreeMap<String, String>,
}

impl RequestContext {
    pub fn new(kind: ComponentKind, site_url: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            site_url: site_url.into(),
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }

    pub fn with_remote_version(mut self, identifier: impl Into<String>, version: impl Into<String>) -> Self {
        self.remote_versions.insert(identifier.into(), version.into());
        self
    }

    pub fn with_screenshot(mut self, index: u32, url: impl Into<String>) -> Self {
        self.screenshot_urls.insert(index, url.into());
        self
    }

    /// Version the remote site reports for the requested identifier
    pub fn remote_version(&self) -> Option<&str> {
        self.remote_versions
            .get(&self.identifier)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Banner URLs restricted to the allowed keys, escaped for attribute use
    pub fn banners(&self) -> Banners {
        let mut banners = Banners::default();
        for (key, url) in &self.banner_urls {
            let escaped = crate::parser::markdown::html_escape(url);
            match key.as_str() {
                "default" => banners.default = escaped,
                "low" => banners.low = escaped,
                "high" => banners.high = escaped,
                _ => {}
            }
        }
        banners
    }

    /// Action name the request nonce is bound to
    pub fn nonce_action(&self) -> String {
        format!("{}_request_{}", self.kind, self.site_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_version_for_identifier() {
        let ctx = RequestContext::new(ComponentKind::Plugin, "https://a.com", "p/p.php")
            .with_remote_version("p/p.php", "1.2.0")
            .with_remote_version("q/q.php", "0.1.0");
        assert_eq!(ctx.remote_version(), Some("1.2.0"));

        let empty = RequestContext::new(ComponentKind::Plugin, "https://a.com", "p/p.php")
            .with_remote_version("p/p.php", "");
        assert_eq!(empty.remote_version(), None);
    }

    #[test]
    fn test_banners_only_allowed_keys() {
        let mut ctx = RequestContext::new(ComponentKind::Plugin, "https://a.com", "p/p.php");
        ctx.banner_urls.insert("low".to_string(), "https://a.com/low.png".to_string());
        ctx.banner_urls.insert("huge".to_string(), "https://a.com/huge.png".to_string());
        let banners = ctx.banners();
        assert_eq!(banners.low, "https://a.com/low.png");
        assert_eq!(banners.default, "");
        assert_eq!(banners.high, "");
    }

    #[test]
    fn test_nonce_action_binds_kind_and_origin() {
        let ctx = RequestContext::new(ComponentKind::Theme, "https://a.com", "t");
        assert_eq!(ctx.nonce_action(), "theme_request_https://a.com");
    }
}
