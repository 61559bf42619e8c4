//! Update feed pipeline
//!
//! Turns stored endpoint documents into update records and answers the two
//! request shapes consumers make: bulk update checks and detail lookups.

pub mod assembler;
pub mod gate;
pub mod icons;
pub mod nonce;
pub mod notice;
pub mod service;
pub mod version;

pub use assembler::{format_timestamp, Assembler};
pub use gate::{apply_access_gate, can_receive_update, gate_query_entry};
pub use icons::IconLocator;
pub use nonce::NonceIssuer;
pub use notice::{feedback_mailto, testing_notice};
pub use service::FeedService;
pub use version::{compare_versions, is_update_available};
