use crate::config::FeedConfig;
use crate::models::{RequestContext, UpdateRecord};
use crate::store::FileStore;
use crate::Result;
use std::path::Path;

/// Build the detail record for one endpoint document as seen from `site_url`
pub fn detail(
    path: &Path,
    site_url: Option<&str>,
    screenshots: &[String],
    config: &FeedConfig,
) -> Result<UpdateRecord> {
    let endpoint = FileStore::load_file(path)?;

    let mut request = RequestContext::new(endpoint.kind, site_url.unwrap_or_default(), endpoint.identifier.clone());
    for (index, url) in (1u32..).zip(screenshots) {
        request = request.with_screenshot(index, url.clone());
    }

    Ok(config
        .assembler()
        .assemble(&endpoint.identifier, &endpoint, &request, &endpoint.body))
}

pub fn run(path: &Path, site_url: Option<&str>, screenshots: &[String], config: &FeedConfig) -> Result<()> {
    let record = detail(path, site_url, screenshots, config)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComponentKind, EndpointRecord, EndpointStatus};
    use tempfile::TempDir;

    const DOC: &str = "=== Shots ===\nVersion: 2.0\nDownload link: https://x/s.zip\n\n== Screenshots ==\n\n1 The dashboard\n2 Settings\n\n== Upgrade Notice ==\n\nBig release.\n";

    fn write(temp: &TempDir, status: EndpointStatus) -> std::path::PathBuf {
        let endpoint = EndpointRecord::new("shots/shots.php", ComponentKind::Plugin, DOC)
            .with_status(status)
            .with_test_urls(&["https://qa.example"]);
        let path = temp.path().join("shots.md");
        FileStore::write_file(&path, &endpoint).unwrap();
        path
    }

    #[test]
    fn test_detail_with_screenshots() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, EndpointStatus::Publish);
        let shots = vec!["https://x/1.png".to_string(), "https://x/2.png".to_string()];

        let record = detail(&path, None, &shots, &FeedConfig::default()).unwrap();
        let html = record.sections.screenshots.unwrap();
        assert!(html.contains("src=\"https://x/1.png\""));
        assert!(html.contains("The dashboard"));
        assert!(html.contains("src=\"https://x/2.png\""));
    }

    #[test]
    fn test_detail_without_screenshots() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, EndpointStatus::Publish);
        let record = detail(&path, None, &[], &FeedConfig::default()).unwrap();
        assert!(record.sections.screenshots.is_none());
        assert_eq!(record.version, "2.0");
    }

    #[test]
    fn test_detail_respects_gate() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, EndpointStatus::Pending);

        let stranger = detail(&path, Some("https://else.example"), &[], &FeedConfig::default()).unwrap();
        assert_eq!(stranger.version, "");

        let tester = detail(&path, Some("https://qa.example"), &[], &FeedConfig::default()).unwrap();
        assert_eq!(tester.version, "2.0");
    }
}
