pub mod form;
pub mod http;

pub use form::{decode_request, merge_pairs, site_url_from_user_agent, strip_tags};
pub use http::{router, start_server, UpdateVar};
