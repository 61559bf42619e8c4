//! Readme-style endpoint document parsing
//!
//! A document is a header block of `Key: value` lines (plus an
//! `=== Name ===` title) followed by `== Heading ==` sections. Parsing is
//! two passes: [`header::extract_header`] returns the header and the lines it
//! did not consume, then [`sections::split_sections`] buckets those lines.

pub mod frontmatter;
pub mod header;
pub mod markdown;
pub mod render;
pub mod reviews;
pub mod screenshots;
pub mod sections;

pub use frontmatter::{normalize_content, parse_document, render_document};
pub use header::{extract_header, HeaderKey};
pub use markdown::{html_escape, render_inline, render_lines, render_markdown};
pub use render::{render_sections, upgrade_notice_excerpt, RatingSummary, RenderedDocument};
pub use reviews::{collect_ratings, count_ratings, rating_score};
pub use screenshots::render_screenshots;
pub use sections::{split_sections, SectionLines, SectionName};

use crate::models::Header;

/// Header and raw sections of one endpoint document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadmeDocument {
    pub header: Header,
    pub sections: SectionLines,
}

/// Parse endpoint text into its header and raw section lines
pub fn parse_readme(text: &str) -> ReadmeDocument {
    let lines: Vec<&str> = text.split('\n').collect();
    let (header, remaining) = extract_header(&lines);
    let sections = split_sections(&remaining);
    ReadmeDocument { header, sections }
}
