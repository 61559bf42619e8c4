//! File-backed feed, from endpoint documents on disk to responses

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use update_feed::feed::IconLocator;
use update_feed::models::{ComponentKind, EndpointRecord, EndpointStatus, QueryEntry, RequestContext};
use update_feed::parser::{extract_header, parse_readme, split_sections, HeaderKey, SectionName};
use update_feed::{Assembler, EndpointStore, FeedService, FileStore, NonceIssuer};

const README: &str = "=== Sample Plugin ===

Version: 2.3.1
Requires: 1.2.0
Requires PHP: 7.4
Tested: 2.0
Author: Jane Doe
Author URI: https://jane.example
Plugin URI: https://jane.example/sample
Download link: https://jane.example/sample.zip
License: GPLv2

Intro prose before any heading is dropped.

== Description ==

Sample does **things**.

== Frequently Asked Questions ==

= Does it work? =
Yes.

== Random ==

Should never appear.

== Reviews ==

*****
Great plugin.

*
Did not work for me.

== Changelog ==

= 2.3.1 =
* Fixes

== Upgrade Notice ==

Security release, update now.
";

struct Fixture {
    _temp: TempDir,
    endpoints: PathBuf,
    service: FeedService<FileStore>,
}

fn fixture(status: EndpointStatus) -> Fixture {
    let temp = TempDir::new().unwrap();
    let endpoints = temp.path().join("endpoints");
    let plugins = temp.path().join("plugins");
    fs::create_dir_all(plugins.join("sample/images")).unwrap();
    fs::write(plugins.join("sample/images/icon-128.png"), b"png").unwrap();

    let store = FileStore::new(endpoints.clone());
    store
        .insert(
            EndpointRecord::new("sample/sample.php", ComponentKind::Plugin, README)
                .with_status(status)
                .with_test_urls(&["https://qa.example/", "  https://staging.example  "])
                .with_notifications("qa@jane.example, https://jane.example/issues"),
        )
        .unwrap();

    let assembler = Assembler::new().with_icons(IconLocator::new(&plugins, "https://cdn.example/plugins"));
    Fixture {
        _temp: temp,
        endpoints,
        service: FeedService::new(store, assembler, NonceIssuer::new("secret", 3600)),
    }
}

fn request(service: &FeedService<FileStore>, site_url: &str, remote: &str) -> RequestContext {
    let ctx = RequestContext::new(ComponentKind::Plugin, site_url, "sample/sample.php")
        .with_remote_version("sample/sample.php", remote);
    let nonce = service.nonces().issue(&ctx.nonce_action());
    ctx.with_nonce(nonce)
}

#[test]
fn header_and_sections_partition_lines() {
    let lines: Vec<&str> = README.split('\n').collect();
    let (header, remaining) = extract_header(&lines);
    let sections = split_sections(&remaining);

    assert_eq!(header.version.as_deref(), Some("2.3.1"));
    assert_eq!(header.download_link.as_deref(), Some("https://jane.example/sample.zip"));

    let names: Vec<SectionName> = sections.names().collect();
    for name in names {
        for line in sections.get(name).unwrap() {
            let lower = line.to_lowercase();
            for key in HeaderKey::ALL {
                assert!(!lower.starts_with(&format!("{}:", key.label())), "{:?} leaked into {:?}", line, name);
            }
        }
    }
}

#[test]
fn detail_record_from_disk() {
    let fixture = fixture(EndpointStatus::Publish);
    let record = fixture
        .service
        .information(&request(&fixture.service, "https://anyone.example", ""))
        .unwrap();

    assert_eq!(record.name, "Sample Plugin");
    assert_eq!(record.slug, "sample");
    assert_eq!(record.version, "2.3.1");
    assert_eq!(record.requires_php, "7.4");
    assert_eq!(record.author, "<a href=\"https://jane.example\">Jane Doe</a>");
    assert_eq!(record.homepage, "https://jane.example/sample");
    assert_eq!(record.compatibility.get("1.2.0"), Some(&true));

    // One five-star and one one-star review
    assert_eq!(record.num_ratings, Some(2));
    assert_eq!(record.rating, Some(60));
    let ratings = record.ratings.as_ref().unwrap();
    assert_eq!(ratings.get(&5), Some(&1));
    assert_eq!(ratings.get(&1), Some(&1));
    assert!(record.sections.reviews.as_deref().unwrap().contains("star-rating"));

    assert!(record.sections.faq.is_some());
    assert!(record.sections.changelog.is_some());
    assert!(record.sections.installation.is_none());
    assert!(record.sections.screenshots.is_none());
    assert_eq!(record.upgrade_notice.as_deref(), Some("Security release, update now."));

    let json = serde_json::to_string(&record).unwrap();
    assert!(!json.contains("Should never appear"));
    assert!(!json.contains("Intro prose"));

    let icons = record.icons.unwrap();
    assert_eq!(icons.default.as_deref(), Some("https://cdn.example/plugins/sample/images/icon-128.png"));
}

#[test]
fn query_compares_remote_version() {
    let fixture = fixture(EndpointStatus::Publish);
    let service = &fixture.service;

    let current = service.query(&request(service, "https://a.example", "2.3.1"));
    assert_eq!(current.get("sample/sample.php"), Some(&QueryEntry::NoUpdate));

    let older = service.query(&request(service, "https://a.example", "2.3.0"));
    let delta = older.get("sample/sample.php").and_then(QueryEntry::delta).unwrap();
    assert_eq!(delta.new_version, "2.3.1");
    assert_eq!(delta.package, "https://jane.example/sample.zip");
    assert_eq!(delta.requires_php, "7.4");
    assert_eq!(delta.tested, "2.0");
    assert!(!delta.updated.is_empty());
}

#[test]
fn pending_endpoint_serves_only_testers() {
    let fixture = fixture(EndpointStatus::Pending);
    let service = &fixture.service;

    assert!(service
        .query(&request(service, "https://other.example", "1.0"))
        .is_empty());
    let info = service
        .information(&request(service, "https://other.example", ""))
        .unwrap();
    assert_eq!(info.version, "");
    assert_eq!(info.download_link, "");
    assert!(info.compatibility.is_empty());
    assert!(info.upgrade_notice.is_none());

    // Whitelist entries are normalized, so trailing slashes and padding do not matter
    for origin in ["https://qa.example", "https://staging.example/"] {
        let delta = service.query(&request(service, origin, "1.0"));
        assert!(delta.get("sample/sample.php").and_then(QueryEntry::delta).is_some());

        let info = service.information(&request(service, origin, "")).unwrap();
        let description = info.sections.description.unwrap();
        assert!(description.starts_with("<div class=\"plugin_testing_notice\">"));
        assert!(description.contains("mailto:qa@jane.example"));
        assert!(description.contains("https://jane.example/issues"));
    }
}

#[test]
fn drafts_are_invisible() {
    let fixture = fixture(EndpointStatus::Draft);
    let service = &fixture.service;
    assert!(service.information(&request(service, "https://a.example", "")).is_none());
    assert!(service.query(&request(service, "https://a.example", "1.0")).is_empty());

    // Still on disk, just not served
    let stored = FileStore::new(fixture.endpoints.clone()).list().unwrap();
    assert_eq!(stored.len(), 1);
}

#[test]
fn garbage_documents_degrade_gracefully() {
    let doc = parse_readme("no headers\n== Nope ==\n\u{0}\u{1}binary-ish\n=== ===\n");
    assert!(doc.header.version.is_none());
    assert_eq!(doc.sections.names().count(), 0);
}
