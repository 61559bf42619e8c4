use crate::models::{ComponentKind, EndpointRecord};
use crate::store::{EndpointStore, FileStore};
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Starting text for a new endpoint
pub fn default_document(kind: ComponentKind) -> String {
    let title = match kind {
        ComponentKind::Plugin => "Plugin",
        ComponentKind::Theme => "Theme",
    };

    let mut content = format!("=== {} Name Here ===\n\n", title);
    content.push_str("Version:           1.0.0\n");
    content.push_str("Requires:          1.0.0\n");
    content.push_str("Download link:     https://\n\n");
    content.push_str("== Description ==\n\n");
    content.push_str("This text displays in the modal windows; it is required. Write something!\n\n");
    content
}

/// Write a draft endpoint document into the store at `dir`
pub fn run(identifier: &str, kind: ComponentKind, dir: &Path) -> Result<()> {
    let store = FileStore::new(dir);
    let endpoint = EndpointRecord::new(identifier, kind, default_document(kind));
    let path = store.path_for(&endpoint);
    store.insert(endpoint)?;

    println!("{}", format!("✓ Created {} endpoint {}", kind, identifier).green());
    println!("  {}", path.display());
    println!(
        "  {}",
        "Edit the text, then set status to pending or publish to serve it".bright_black()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EndpointStatus;
    use crate::parser::parse_readme;
    use tempfile::TempDir;

    #[test]
    fn test_default_document_parses() {
        let doc = parse_readme(&default_document(ComponentKind::Plugin));
        assert_eq!(doc.header.name(), "Plugin Name Here");
        assert_eq!(doc.header.version(), "1.0.0");
        assert_eq!(doc.header.requires(), Some("1.0.0"));
        assert_eq!(doc.header.download_link.as_deref(), Some("https://"));
    }

    #[test]
    fn test_new_writes_draft() {
        let temp = TempDir::new().unwrap();
        run("my-theme", ComponentKind::Theme, temp.path()).unwrap();

        let store = FileStore::new(temp.path());
        let endpoints = store.list().unwrap();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].status, EndpointStatus::Draft);
        assert!(endpoints[0].body.starts_with("=== Theme Name Here ==="));

        assert!(run("my-theme", ComponentKind::Theme, temp.path()).is_err());
    }
}
