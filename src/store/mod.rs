//! Endpoint storage
//!
//! The feed treats its content store as a plain lookup-by-identifier service.
//! [`FileStore`] keeps one frontmatter document per endpoint on disk;
//! [`MemoryStore`] holds records in memory for embedding and tests.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::models::{ComponentKind, EndpointRecord};
use std::path::PathBuf;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when reading or writing endpoints
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access endpoint store: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse endpoint document {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize endpoint: {0}")]
    Serialize(String),

    #[error("Endpoint already exists: {0}")]
    Duplicate(String),
}

/// Lookup of endpoint records by identifier
pub trait EndpointStore: Send + Sync {
    /// All stored endpoints, whatever their status
    fn list(&self) -> StoreResult<Vec<EndpointRecord>>;

    /// The pending or published endpoint for `identifier`, if any
    fn find(&self, kind: ComponentKind, identifier: &str) -> StoreResult<Option<EndpointRecord>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|e| e.kind == kind && e.identifier == identifier && e.status.is_visible()))
    }

    /// Insert a new endpoint
    fn insert(&self, endpoint: EndpointRecord) -> StoreResult<()>;
}
