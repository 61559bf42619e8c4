//! Section rendering
//!
//! Turns raw section lines into the HTML (or plain text) served to clients.
//! Each renderer only runs when its section has content; absent sections stay
//! `None` so they are omitted from responses.

use super::markdown::{render_inline, render_lines};
use super::reviews::{collect_ratings, count_ratings, rating_score, render_reviews};
use super::screenshots::render_screenshots;
use super::sections::{SectionLines, SectionName};
use crate::models::RenderedSections;
use std::collections::BTreeMap;

/// Aggregated star ratings from the reviews section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingSummary {
    pub ratings: BTreeMap<usize, u32>,
    pub num_ratings: u32,
    pub rating: u32,
}

impl RatingSummary {
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let ratings = collect_ratings(lines);
        let num_ratings = count_ratings(&ratings);
        let rating = rating_score(&ratings, num_ratings);
        Self {
            ratings,
            num_ratings,
            rating,
        }
    }
}

/// Output of rendering every section of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub sections: RenderedSections,
    /// First line of the upgrade notice, for list rows
    pub upgrade_notice: Option<String>,
    pub ratings: Option<RatingSummary>,
}

/// First non-empty line of the upgrade notice as inline markup
pub fn upgrade_notice_excerpt<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    lines
        .iter()
        .map(|l| l.as_ref().trim())
        .find(|l| !l.is_empty() && !l.starts_with("=="))
        .map(render_inline)
}

/// Render all recognized sections
pub fn render_sections(
    lines: &SectionLines,
    screenshot_urls: &BTreeMap<u32, String>,
) -> RenderedDocument {
    let generic = |name: SectionName| lines.non_empty(name).map(render_lines);

    let mut rendered = RenderedDocument {
        sections: RenderedSections {
            description: generic(SectionName::Description),
            faq: generic(SectionName::Faq),
            installation: generic(SectionName::Installation),
            other_notes: generic(SectionName::OtherNotes),
            changelog: generic(SectionName::Changelog),
            ..Default::default()
        },
        ..Default::default()
    };

    if let Some(shots) = lines.non_empty(SectionName::Screenshots) {
        rendered.sections.screenshots = render_screenshots(screenshot_urls, shots);
    }

    if let Some(reviews) = lines.non_empty(SectionName::Reviews) {
        rendered.sections.reviews = Some(render_reviews(reviews));
        rendered.ratings = Some(RatingSummary::from_lines(reviews));
    }

    if let Some(notice) = lines.non_empty(SectionName::UpgradeNotice) {
        rendered.upgrade_notice = upgrade_notice_excerpt(notice);
        rendered.sections.upgrade_notice = Some(render_lines(notice));
    }

    rendered
}
