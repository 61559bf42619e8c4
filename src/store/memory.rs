use super::{EndpointStore, StoreError, StoreResult};
use crate::models::EndpointRecord;
use std::sync::RwLock;

/// In-memory endpoint store
#[derive(Debug, Default)]
pub struct MemoryStore {
    endpoints: RwLock<Vec<EndpointRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(endpoints: Vec<EndpointRecord>) -> Self {
        Self {
            endpoints: RwLock::new(endpoints),
        }
    }
}

impl EndpointStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<EndpointRecord>> {
        let endpoints = self
            .endpoints
            .read()
            .map_err(|e| StoreError::Io(std::io::Error::other(e.to_string())))?;
        Ok(endpoints.clone())
    }

    fn insert(&self, endpoint: EndpointRecord) -> StoreResult<()> {
        let mut endpoints = self
            .endpoints
            .write()
            .map_err(|e| StoreError::Io(std::io::Error::other(e.to_string())))?;
        if endpoints
            .iter()
            .any(|e| e.kind == endpoint.kind && e.identifier == endpoint.identifier)
        {
            return Err(StoreError::Duplicate(endpoint.identifier));
        }
        endpoints.push(endpoint);
        Ok(())
    }
}
