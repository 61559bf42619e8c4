//! Lint an endpoint document before publishing it

use crate::parser::{parse_readme, SectionName};
use crate::store::FileStore;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Problems that would leave consumers with an unusable record
pub fn problems(text: &str) -> Vec<String> {
    let doc = parse_readme(text);
    let mut problems = Vec::new();

    if doc.header.name().is_empty() {
        problems.push("Missing title line (=== Name ===)".to_string());
    }
    if doc.header.version().is_empty() {
        problems.push("Missing header: Version".to_string());
    }
    if doc
        .header
        .download_link
        .as_deref()
        .map_or(true, |link| link.is_empty() || link == "https://")
    {
        problems.push("Missing header: Download link".to_string());
    }
    if doc.sections.non_empty(SectionName::Description).is_none() {
        problems.push("Missing section: Description".to_string());
    }

    problems
}

pub fn run(path: &Path) -> Result<()> {
    let endpoint = FileStore::load_file(path)?;
    let problems = problems(&endpoint.body);

    if problems.is_empty() {
        println!(
            "{}",
            format!("✅ {} ({}) looks good", endpoint.identifier, endpoint.kind).green()
        );
        return Ok(());
    }

    println!("{}", format!("❌ {}:", endpoint.identifier).red().bold());
    for problem in &problems {
        println!("   • {}", problem);
    }
    anyhow::bail!("{} problem(s) found in {}", problems.len(), path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::new::default_document;
    use crate::models::ComponentKind;

    #[test]
    fn test_complete_document_passes() {
        let text = "=== Hello ===\nVersion: 1.0\nDownload link: https://x/h.zip\n== Description ==\nHi.\n";
        assert!(problems(text).is_empty());
    }

    #[test]
    fn test_default_document_needs_download_link() {
        let problems = problems(&default_document(ComponentKind::Plugin));
        assert_eq!(problems, vec!["Missing header: Download link".to_string()]);
    }

    #[test]
    fn test_empty_document_reports_everything() {
        assert_eq!(problems("").len(), 4);
    }
}
