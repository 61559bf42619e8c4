//! HTTP surface
//!
//! Consumers hit `/?update=<var>` with GET or POST:
//! - `query_plugins` / `query_themes`: bulk update check
//! - `plugin_information` / `theme_information`: detail lookup
//!
//! Any other `update` value is a 404. Answers are JSON and never cached.

use super::form::{decode_request, merge_pairs};
use crate::config::FeedConfig;
use crate::feed::FeedService;
use crate::models::ComponentKind;
use crate::store::{EndpointStore, FileStore};
use crate::Result;
use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

const NO_CACHE: &str = "no-cache, must-revalidate, max-age=0";

/// What a request var asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateVar {
    Query(ComponentKind),
    Information(ComponentKind),
}

impl UpdateVar {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "query_plugins" => Some(Self::Query(ComponentKind::Plugin)),
            "plugin_information" => Some(Self::Information(ComponentKind::Plugin)),
            "query_themes" => Some(Self::Query(ComponentKind::Theme)),
            "theme_information" => Some(Self::Information(ComponentKind::Theme)),
            _ => None,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Query(kind) | Self::Information(kind) => *kind,
        }
    }
}

/// Build the feed router around a service
pub fn router<S: EndpointStore + 'static>(service: Arc<FeedService<S>>) -> Router {
    Router::new()
        .route("/", get(handle_update::<S>).post(handle_update::<S>))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Serve the file-backed feed described by `config`
pub async fn start_server(config: &FeedConfig) -> Result<()> {
    let store = FileStore::new(config.endpoints_dir.clone());
    let service = FeedService::new(store, config.assembler(), config.nonce_issuer());
    let app = router(Arc::new(service));

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, endpoints = %config.endpoints_dir.display(), "update feed listening");
    println!("✓ Server listening on http://{}", addr);
    println!("  Plugin updates: http://{}/?update=query_plugins", addr);
    println!("  Theme updates:  http://{}/?update=query_themes", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn handle_update<S: EndpointStore + 'static>(
    State(service): State<Arc<FeedService<S>>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let pairs = merge_pairs(query.as_deref(), &body);
    let var = pairs
        .iter()
        .rev()
        .find(|(k, _)| k == "update")
        .and_then(|(_, v)| UpdateVar::parse(v));
    let Some(var) = var else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let request = decode_request(var.kind(), &pairs, user_agent, service.nonces());
    debug!(?var, site_url = %request.site_url, identifier = %request.identifier, "update request");

    match var {
        UpdateVar::Query(_) => json_response(&service.query(&request)),
        UpdateVar::Information(_) => match service.information(&request) {
            Some(record) => json_response(&record),
            None => json_response(&serde_json::Map::new()),
        },
    }
}

fn json_response<T: Serialize>(payload: &T) -> Response {
    (
        [(header::CACHE_CONTROL, NO_CACHE), (header::EXPIRES, "0")],
        Json(payload),
    )
        .into_response()
}
