// Update Feed - self-hosted plugin and theme update endpoints
// Turns readme-style endpoint documents into update-check and detail responses

pub mod cli;
pub mod config;
pub mod feed;
pub mod models;
pub mod parser;
pub mod server;
pub mod store;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use config::FeedConfig;
pub use feed::{Assembler, FeedService, NonceIssuer};
pub use models::{EndpointRecord, QueryResponse, RequestContext, UpdateRecord};
pub use store::{EndpointStore, FileStore, MemoryStore};
