//! YAML Frontmatter Parser
//!
//! Endpoint documents on disk carry their record metadata as YAML frontmatter
//! followed by the readme-style body:
//!
//! ```text
//! ---
//! identifier: my-plugin/my-plugin.php
//! status: publish
//! ---
//! === My Plugin ===
//! ```
//!
//! Handles:
//! - BOM (Byte Order Mark) stripping
//! - Line ending normalization (CRLF → LF)
//! - Proper handling of YAML multiline strings containing `---`

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::OnceLock;

/// Parsed document with frontmatter and body separated
#[derive(Debug, Clone)]
pub struct ParsedDocument<T> {
    /// Deserialized frontmatter
    pub frontmatter: T,
    /// Body after the closing delimiter
    pub body: String,
}

/// Parse a document with YAML frontmatter
///
/// # Errors
/// * If document doesn't start with `---`
/// * If frontmatter is not properly closed
/// * If YAML parsing fails
pub fn parse_document<T: DeserializeOwned>(content: &str) -> Result<ParsedDocument<T>> {
    let normalized = normalize_content(content);
    let (frontmatter_str, body) = split_frontmatter(&normalized)?;

    let frontmatter: T =
        serde_yaml::from_str(&frontmatter_str).context("Failed to parse YAML frontmatter")?;

    Ok(ParsedDocument { frontmatter, body })
}

/// Render frontmatter and body back into a single document
pub fn render_document<T: Serialize>(frontmatter: &T, body: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(frontmatter).context("Failed to serialize frontmatter")?;
    Ok(format!("---\n{}---\n{}", yaml, body))
}


/// Normalize content: strip BOM, normalize line endings
///
/// Handles:
/// - UTF-8 BOM (EF BB BF / U+FEFF)
/// - CRLF → LF
/// - CR → LF (old Mac style)
pub fn normalize_content(content: &str) -> String {
    let s = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    s.replace("\r\n", "\n").replace('\r', "\n")
}

fn closing_delimiter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n---[ \t]*\n|\n---[ \t]*$").expect("valid regex"))
}

/// Split frontmatter from body
///
/// Frontmatter requirements:
/// - Must start with `---` at line 1, column 0
/// - Must end with `---` at column 0 (not inside YAML multiline string)
/// - Closing `---` can have trailing whitespace
///
/// # Returns
/// * `(frontmatter_string, body_string)` tuple
pub fn split_frontmatter(content: &str) -> Result<(String, String)> {
    if !content.starts_with("---") {
        bail!("Document must start with YAML frontmatter (---)")
    }

    if content == "---" || content == "---\n" {
        bail!("Frontmatter not properly closed (--- must be at line start)")
    }

    let content_after_open = match content.strip_prefix("---\n") {
        Some(rest) => rest,
        None => bail!("Invalid frontmatter: opening --- must be followed by newline"),
    };

    // An empty frontmatter block closes immediately
    if let Some(body) = content_after_open.strip_prefix("---\n") {
        return Ok((String::new(), body.to_string()));
    }

    if let Some(m) = closing_delimiter().find(content_after_open) {
        let frontmatter = content_after_open[..m.start()].to_string();
        let body = content_after_open[m.end()..].to_string();
        Ok((frontmatter, body))
    } else {
        bail!("Frontmatter not properly closed (--- must be at line start)")
    }
}
