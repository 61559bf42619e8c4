//! Query and detail entry points
//!
//! Both entry points share the same front half: the request must carry a site
//! URL, an identifier and a nonce valid for that origin, and the identifier
//! must resolve to a visible endpoint with a non-empty body. Any miss returns
//! an empty answer; callers cannot tell the cases apart.

use super::assembler::Assembler;
use super::gate::gate_query_entry;
use super::nonce::NonceIssuer;
use super::version::is_update_available;
use crate::models::{
    ComponentKind, EndpointRecord, QueryEntry, QueryResponse, RequestContext, UpdateDelta, UpdateRecord,
};
use crate::store::EndpointStore;
use tracing::{debug, warn};

/// Serves update checks and detail lookups from an endpoint store
pub struct FeedService<S: EndpointStore> {
    store: S,
    assembler: Assembler,
    nonces: NonceIssuer,
}

impl<S: EndpointStore> FeedService<S> {
    pub fn new(store: S, assembler: Assembler, nonces: NonceIssuer) -> Self {
        Self {
            store,
            assembler,
            nonces,
        }
    }

    pub fn nonces(&self) -> &NonceIssuer {
        &self.nonces
    }

    /// Resolve the endpoint a request refers to
    fn resolve(&self, request: &RequestContext) -> Option<EndpointRecord> {
        if request.site_url.is_empty() {
            debug!("request without site url");
            return None;
        }
        if request.identifier.is_empty() {
            debug!(site_url = %request.site_url, "request without identifier");
            return None;
        }
        if !self.nonces.verify(&request.nonce, &request.nonce_action()) {
            debug!(site_url = %request.site_url, "nonce rejected");
            return None;
        }

        let endpoint = match self.store.find(request.kind, &request.identifier) {
            Ok(Some(endpoint)) => endpoint,
            Ok(None) => {
                debug!(identifier = %request.identifier, kind = %request.kind, "no visible endpoint");
                return None;
            }
            Err(e) => {
                warn!(identifier = %request.identifier, error = %e, "endpoint lookup failed");
                return None;
            }
        };

        if endpoint.body.trim().is_empty() {
            debug!(identifier = %request.identifier, "endpoint has no content");
            return None;
        }

        Some(endpoint)
    }

    /// Bulk update check for one identifier
    ///
    /// Returns an empty response when the request cannot be served, otherwise
    /// a single entry keyed by identifier: `{}` when the remote is current,
    /// the update delta when the latest version is newer.
    pub fn query(&self, request: &RequestContext) -> QueryResponse {
        let Some(endpoint) = self.resolve(request) else {
            return QueryResponse::empty();
        };
        let Some(remote) = request.remote_version() else {
            debug!(identifier = %request.identifier, "no remote version reported");
            return QueryResponse::empty();
        };

        let record = self
            .assembler
            .assemble(&request.identifier, &endpoint, request, &endpoint.body);
        if record.version.is_empty() {
            debug!(identifier = %request.identifier, "no version available to requester");
            return QueryResponse::empty();
        }

        let mut entry = QueryEntry::NoUpdate;
        if is_update_available(remote, &record.version) {
            entry = QueryEntry::Update(delta_for(request.kind, &record));
        }

        QueryResponse::single(
            request.identifier.clone(),
            gate_query_entry(entry, &endpoint, &request.site_url),
        )
    }

    /// Full detail record for one identifier
    pub fn information(&self, request: &RequestContext) -> Option<UpdateRecord> {
        let endpoint = self.resolve(request)?;
        Some(
            self.assembler
                .assemble(&request.identifier, &endpoint, request, &endpoint.body),
        )
    }
}

fn delta_for(kind: ComponentKind, record: &UpdateRecord) -> UpdateDelta {
    let (plugin, theme) = match kind {
        ComponentKind::Plugin => (Some(record.identifier.clone()), None),
        ComponentKind::Theme => (None, Some(record.identifier.clone())),
    };

    UpdateDelta {
        slug: record.slug.clone(),
        plugin,
        theme,
        new_version: record.version.clone(),
        package: record.download_link.clone(),
        requires: record.requires.clone(),
        tested: record.tested.clone(),
        requires_php: record.requires_php.clone(),
        updated: record.last_updated.clone(),
        upgrade_notice: record.upgrade_notice.clone().unwrap_or_default(),
    }
}
