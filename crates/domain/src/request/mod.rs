//! HTTP Request domain types

mod body;
mod header;
mod method;
mod query;
mod spec;

pub use body::{DEFAULT_CONTENT_TYPE, RequestBody, SendBody, resolve_content_type};
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
pub use spec::{RequestSpec, resolve_url};
