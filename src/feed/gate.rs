//! Access gate for pending endpoints
//!
//! A pending endpoint is browsable by anyone, but only whitelisted test
//! origins may see what they need to actually update. Everyone else gets an
//! information-only record.

use crate::models::{EndpointRecord, QueryEntry, UpdateRecord};

/// Whether `origin` may receive the full update data for `endpoint`
pub fn can_receive_update(endpoint: &EndpointRecord, origin: &str) -> bool {
    !endpoint.is_pending() || endpoint.is_whitelisted(origin)
}

/// Strip update-enabling fields from a record the requester may not install
pub fn apply_access_gate(mut record: UpdateRecord, endpoint: &EndpointRecord, origin: &str) -> UpdateRecord {
    if can_receive_update(endpoint, origin) {
        return record;
    }

    record.version.clear();
    record.requires_php.clear();
    record.requires.clear();
    record.tested.clear();
    record.download_link.clear();
    record.last_updated.clear();
    record.compatibility.clear();
    record.upgrade_notice = None;
    record.sections.upgrade_notice = None;

    record
}

/// Identifier-level gate for query answers
pub fn gate_query_entry(entry: QueryEntry, endpoint: &EndpointRecord, origin: &str) -> QueryEntry {
    if can_receive_update(endpoint, origin) {
        entry
    } else {
        QueryEntry::NoUpdate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComponentKind, EndpointStatus, UpdateDelta};

    fn record() -> UpdateRecord {
        let mut record = UpdateRecord {
            version: "1.0.0".to_string(),
            requires: "1.0.0".to_string(),
            requires_php: "7.4".to_string(),
            tested: "2.0".to_string(),
            download_link: "https://x/p.zip".to_string(),
            last_updated: "2024-01-01 00:00:00".to_string(),
            upgrade_notice: Some("Update!".to_string()),
            name: "P".to_string(),
            ..Default::default()
        };
        record.compatibility.insert("1.0.0".to_string(), true);
        record.sections.upgrade_notice = Some("<p>Update!</p>".to_string());
        record.sections.description = Some("<p>d</p>".to_string());
        record
    }

    fn endpoint(status: EndpointStatus) -> EndpointRecord {
        EndpointRecord::new("p/p.php", ComponentKind::Plugin, "")
            .with_status(status)
            .with_test_urls(&["https://allowed.com"])
    }

    #[test]
    fn test_published_passes_through() {
        let gated = apply_access_gate(record(), &endpoint(EndpointStatus::Publish), "https://other.com");
        assert_eq!(gated, record());
    }

    #[test]
    fn test_pending_whitelisted_passes_through() {
        let gated = apply_access_gate(record(), &endpoint(EndpointStatus::Pending), "https://allowed.com");
        assert_eq!(gated, record());
    }

    #[test]
    fn test_pending_other_origin_is_stripped() {
        let gated = apply_access_gate(record(), &endpoint(EndpointStatus::Pending), "https://other.com");
        assert_eq!(gated.version, "");
        assert_eq!(gated.download_link, "");
        assert_eq!(gated.requires, "");
        assert_eq!(gated.requires_php, "");
        assert_eq!(gated.tested, "");
        assert_eq!(gated.last_updated, "");
        assert!(gated.compatibility.is_empty());
        assert!(gated.upgrade_notice.is_none());
        assert!(gated.sections.upgrade_notice.is_none());
        // Informational fields survive
        assert_eq!(gated.name, "P");
        assert!(gated.sections.description.is_some());
    }

    #[test]
    fn test_query_entry_gate() {
        let entry = QueryEntry::Update(UpdateDelta::default());
        let pending = endpoint(EndpointStatus::Pending);
        assert_eq!(gate_query_entry(entry.clone(), &pending, "https://other.com"), QueryEntry::NoUpdate);
        assert_eq!(gate_query_entry(entry.clone(), &pending, "https://allowed.com"), entry);
    }
}
