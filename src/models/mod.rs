pub mod endpoint;
pub mod record;
pub mod request;

pub use endpoint::{
    normalize_origin, parse_test_urls, ComponentKind, EndpointRecord, EndpointStatus,
    NotificationTargets,
};
pub use record::{
    Banners, Header, Icons, QueryEntry, QueryResponse, RenderedSections, UpdateDelta, UpdateRecord,
};
pub use request::RequestContext;
