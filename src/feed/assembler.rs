//! Update record assembly
//!
//! Runs the parse and render passes over an endpoint's text and merges the
//! result with the endpoint record and request context into an
//! [`UpdateRecord`]. The access gate is applied before the record is returned.

use super::gate::apply_access_gate;
use super::icons::IconLocator;
use super::notice::testing_notice;
use crate::models::{ComponentKind, EndpointRecord, RequestContext, UpdateRecord};
use crate::parser::{parse_readme, render_sections};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Timestamps are served as `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Builds normalized update records
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    icons: Option<IconLocator>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up plugin icons with `locator`
    pub fn with_icons(mut self, locator: IconLocator) -> Self {
        self.icons = Some(locator);
        self
    }

    /// Assemble the gated update record for `identifier`
    pub fn assemble(
        &self,
        identifier: &str,
        endpoint: &EndpointRecord,
        request: &RequestContext,
        text: &str,
    ) -> UpdateRecord {
        let doc = parse_readme(text);
        let header = doc.header;
        let rendered = render_sections(&doc.sections, &request.screenshot_urls);
        let mut sections = rendered.sections;

        if endpoint.is_pending() && endpoint.is_whitelisted(&request.site_url) {
            let notice = testing_notice(&endpoint.notification_targets(), &header);
            sections.prepend_all(&notice);
        }

        let kind = endpoint.kind;
        let value = |field: &Option<String>| field.clone().unwrap_or_default();
        let homepage = match kind {
            ComponentKind::Plugin => value(&header.plugin_uri),
            ComponentKind::Theme => value(&header.theme_uri),
        };

        let mut compatibility = BTreeMap::new();
        if let Some(requires) = header.requires() {
            compatibility.insert(requires.to_string(), true);
        }

        let (banners, icons) = match kind {
            ComponentKind::Plugin => (
                Some(request.banners()),
                Some(
                    self.icons
                        .as_ref()
                        .map(|locator| locator.icons_for(&kind.slug_for(identifier)))
                        .unwrap_or_default(),
                ),
            ),
            ComponentKind::Theme => (None, None),
        };

        let ratings = rendered.ratings;

        let record = UpdateRecord {
            external: true,
            identifier: identifier.to_string(),
            slug: kind.slug_for(identifier),
            name: value(&header.name),
            description: sections.description.clone().unwrap_or_default(),
            version: value(&header.version),
            text_domain: value(&header.text_domain),
            domain_path: value(&header.domain_path),
            requires_php: value(&header.requires_php),
            requires: value(&header.requires),
            tested: value(&header.tested),
            author: header.author_link(),
            author_uri: value(&header.author_uri),
            plugin_uri: (kind == ComponentKind::Plugin).then(|| homepage.clone()),
            theme_uri: (kind == ComponentKind::Theme).then(|| homepage.clone()),
            download_link: value(&header.download_link),
            donate_link: value(&header.donate_link),
            license: value(&header.license),
            license_uri: value(&header.license_uri),
            homepage,
            last_updated: format_timestamp(&endpoint.modified),
            added: format_timestamp(&endpoint.created),
            active_installs: endpoint.active_installs.filter(|n| *n > 0),
            banners,
            icons,
            compatibility,
            ratings: ratings.as_ref().map(|r| r.ratings.clone()),
            num_ratings: ratings.as_ref().map(|r| r.num_ratings),
            rating: ratings.as_ref().map(|r| r.rating),
            upgrade_notice: rendered.upgrade_notice,
            sections,
        };

        apply_access_gate(record, endpoint, &request.site_url)
    }
}
