//! Header extraction
//!
//! Pulls `Key: value` properties and the `=== Name ===` title out of an
//! endpoint document. Consumed lines are not returned, so the section
//! splitter never sees them.

use crate::models::Header;

/// Recognized header properties, matched case-insensitively as `<prefix>:`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKey {
    Name,
    Description,
    Version,
    TextDomain,
    DomainPath,
    RequiresPhp,
    Requires,
    Tested,
    Author,
    AuthorUri,
    PluginUri,
    ThemeUri,
    DownloadLink,
    DonateLink,
    License,
    LicenseUri,
}

impl HeaderKey {
    pub const ALL: [HeaderKey; 16] = [
        HeaderKey::Name,
        HeaderKey::Description,
        HeaderKey::Version,
        HeaderKey::TextDomain,
        HeaderKey::DomainPath,
        HeaderKey::RequiresPhp,
        HeaderKey::Requires,
        HeaderKey::Tested,
        HeaderKey::Author,
        HeaderKey::AuthorUri,
        HeaderKey::PluginUri,
        HeaderKey::ThemeUri,
        HeaderKey::DownloadLink,
        HeaderKey::DonateLink,
        HeaderKey::License,
        HeaderKey::LicenseUri,
    ];

    /// Lowercase label as written in documents, without the colon
    pub fn label(&self) -> &'static str {
        match self {
            HeaderKey::Name => "name",
            HeaderKey::Description => "description",
            HeaderKey::Version => "version",
            HeaderKey::TextDomain => "text domain",
            HeaderKey::DomainPath => "domain path",
            HeaderKey::RequiresPhp => "requires php",
            HeaderKey::Requires => "requires",
            HeaderKey::Tested => "tested",
            HeaderKey::Author => "author",
            HeaderKey::AuthorUri => "author uri",
            HeaderKey::PluginUri => "plugin uri",
            HeaderKey::ThemeUri => "theme uri",
            HeaderKey::DownloadLink => "download link",
            HeaderKey::DonateLink => "donate link",
            HeaderKey::License => "license",
            HeaderKey::LicenseUri => "license uri",
        }
    }

    /// Return the trimmed value if `line` is this property
    fn strip<'a>(&self, line: &'a str) -> Option<&'a str> {
        let label = self.label();
        let prefix_len = label.len() + 1;
        let head = line.get(..prefix_len)?;
        let (name, colon) = head.split_at(label.len());
        if colon == ":" && name.eq_ignore_ascii_case(label) {
            Some(line[prefix_len..].trim())
        } else {
            None
        }
    }

    fn slot<'h>(&self, header: &'h mut Header) -> &'h mut Option<String> {
        match self {
            HeaderKey::Name => &mut header.name,
            HeaderKey::Description => &mut header.description,
            HeaderKey::Version => &mut header.version,
            HeaderKey::TextDomain => &mut header.text_domain,
            HeaderKey::DomainPath => &mut header.domain_path,
            HeaderKey::RequiresPhp => &mut header.requires_php,
            HeaderKey::Requires => &mut header.requires,
            HeaderKey::Tested => &mut header.tested,
            HeaderKey::Author => &mut header.author,
            HeaderKey::AuthorUri => &mut header.author_uri,
            HeaderKey::PluginUri => &mut header.plugin_uri,
            HeaderKey::ThemeUri => &mut header.theme_uri,
            HeaderKey::DownloadLink => &mut header.download_link,
            HeaderKey::DonateLink => &mut header.donate_link,
            HeaderKey::License => &mut header.license,
            HeaderKey::LicenseUri => &mut header.license_uri,
        }
    }
}

/// Title lines start with `===`; the name is the line with every `===` removed
fn parse_title(line: &str) -> Option<String> {
    line.starts_with("===")
        .then(|| line.replace("===", "").trim().to_string())
}

/// Split lines into the header and the lines left for section splitting
///
/// Every line is right-trimmed. Lines matching a header property or the title
/// pattern are consumed; later occurrences of the same property win.
pub fn extract_header<S: AsRef<str>>(lines: &[S]) -> (Header, Vec<String>) {
    let mut header = Header::default();
    let mut remaining = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.as_ref().trim_end();

        if let Some(name) = parse_title(line) {
            header.name = Some(name);
            continue;
        }

        let matched = HeaderKey::ALL
            .iter()
            .find_map(|key| key.strip(line).map(|value| (key, value)));

        match matched {
            Some((key, value)) => *key.slot(&mut header) = Some(value.to_string()),
            None => remaining.push(line.to_string()),
        }
    }

    (header, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_and_properties() {
        let lines = [
            "=== My Plugin ===",
            "",
            "Version:           1.0.0",
            "REQUIRES: 1.1.0",
            "Requires PHP: 7.2",
            "Download link:     https://x",
            "Author URI: https://me.dev",
            "== Description ==",
            "Some text.",
        ];
        let (header, rest) = extract_header(&lines);

        assert_eq!(header.name.as_deref(), Some("My Plugin"));
        assert_eq!(header.version.as_deref(), Some("1.0.0"));
        assert_eq!(header.requires.as_deref(), Some("1.1.0"));
        assert_eq!(header.requires_php.as_deref(), Some("7.2"));
        assert_eq!(header.download_link.as_deref(), Some("https://x"));
        assert_eq!(header.author_uri.as_deref(), Some("https://me.dev"));
        assert!(header.author.is_none());
        assert_eq!(rest, vec!["", "== Description ==", "Some text."]);
    }

    #[test]
    fn test_lines_are_right_trimmed() {
        let (_, rest) = extract_header(&["== Changelog ==   ", "  indented  \r"]);
        assert_eq!(rest, vec!["== Changelog ==", "  indented"]);
    }

    #[test]
    fn test_prefix_requires_colon() {
        let (header, rest) = extract_header(&["Versioning is hard", "Tested up to: 1.0"]);
        assert!(header.is_empty());
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn test_empty_value_is_recorded() {
        let (header, rest) = extract_header(&["License:"]);
        assert_eq!(header.license.as_deref(), Some(""));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_title_with_trailing_text() {
        let (header, _) = extract_header(&["===Theme Name==="]);
        assert_eq!(header.name.as_deref(), Some("Theme Name"));
    }
}
