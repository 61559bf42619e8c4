//! Screenshots section
//!
//! Screenshot images are not part of the document: the caller supplies their
//! URLs. The section body only carries an optional `#` header line and
//! captions of the form `<index> <caption text>`.

use super::markdown::{html_escape, render_markdown};
use std::collections::BTreeMap;

/// Parse `3 Some caption` into `(3, "Some caption")`
fn parse_caption(line: &str) -> Option<(u32, String)> {
    let line = line.trim();
    let digits: String = line.chars().take_while(|c| c.is_ascii_digit()).collect();
    let index = digits.parse::<u32>().ok()?;
    let caption = line
        .split_once(' ')
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default();
    Some((index, caption))
}

/// Render screenshots for the supplied URLs, pairing each with its caption
///
/// Returns `None` when no URLs were supplied.
pub fn render_screenshots<S: AsRef<str>>(
    urls: &BTreeMap<u32, String>,
    lines: &[S],
) -> Option<String> {
    if urls.is_empty() {
        return None;
    }

    let mut markup = String::new();
    let mut lines: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();

    if let Some(pos) = lines.iter().position(|l| l.starts_with('#')) {
        markup.push_str(&render_markdown(lines.remove(pos)));
    }

    let captions: BTreeMap<u32, String> = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| parse_caption(l))
        .collect();

    for (index, url) in urls {
        let caption = captions.get(index).map(String::as_str).unwrap_or("");
        markup.push_str(&format!(
            "<p><img src=\"{}\" alt=\"{}\"></p>",
            html_escape(url),
            html_escape(caption)
        ));
        if !caption.is_empty() {
            markup.push_str("<div>");
            markup.push_str(&render_markdown(caption));
            markup.push_str("</div>");
        }
    }

    Some(markup)
}
