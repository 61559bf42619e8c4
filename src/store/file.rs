//! File-backed endpoint store
//!
//! Each endpoint is a Markdown-style document under the store root: YAML
//! frontmatter holding the record metadata, followed by the readme text.

use super::{EndpointStore, StoreError, StoreResult};
use crate::models::EndpointRecord;
use crate::parser::frontmatter::{parse_document, render_document, ParsedDocument};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const EXTENSION: &str = "md";

/// Endpoint documents in a directory tree
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read one endpoint document
    pub fn load_file(path: &Path) -> StoreResult<EndpointRecord> {
        let content = std::fs::read_to_string(path)?;
        let doc: ParsedDocument<EndpointRecord> =
            parse_document(&content).map_err(|e| StoreError::Parse {
                path: path.to_path_buf(),
                message: format!("{:#}", e),
            })?;

        let mut endpoint = doc.frontmatter;
        endpoint.body = doc.body;
        Ok(endpoint)
    }

    /// Write one endpoint document, replacing any existing file
    pub fn write_file(path: &Path, endpoint: &EndpointRecord) -> StoreResult<()> {
        let content = render_document(endpoint, &endpoint.body)
            .map_err(|e| StoreError::Serialize(format!("{:#}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// File name for an endpoint: `<kind>-<identifier with separators dashed>.md`
    pub fn file_name(endpoint: &EndpointRecord) -> String {
        let stem: String = endpoint
            .identifier
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
            .collect();
        format!("{}-{}.{}", endpoint.kind, stem, EXTENSION)
    }

    pub fn path_for(&self, endpoint: &EndpointRecord) -> PathBuf {
        self.root.join(Self::file_name(endpoint))
    }

    fn document_paths(&self) -> Vec<PathBuf> {
        if !self.root.exists() {
            return Vec::new();
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == EXTENSION))
            .collect();
        paths.sort();
        paths
    }
}

impl EndpointStore for FileStore {
    fn list(&self) -> StoreResult<Vec<EndpointRecord>> {
        let mut endpoints = Vec::new();
        for path in self.document_paths() {
            match Self::load_file(&path) {
                Ok(endpoint) => endpoints.push(endpoint),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable endpoint"),
            }
        }
        debug!(root = %self.root.display(), count = endpoints.len(), "listed endpoints");
        Ok(endpoints)
    }

    fn insert(&self, endpoint: EndpointRecord) -> StoreResult<()> {
        let exists = self
            .list()?
            .iter()
            .any(|e| e.kind == endpoint.kind && e.identifier == endpoint.identifier);
        let path = self.path_for(&endpoint);
        if exists || path.exists() {
            return Err(StoreError::Duplicate(endpoint.identifier));
        }
        Self::write_file(&path, &endpoint)
    }
}
