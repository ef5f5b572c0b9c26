//! Authenticated HTTP client.
//!
//! - [`RequestDescriptor`]: an outgoing request plus its replay bookkeeping
//! - [`pipeline`]: attaches the bearer token before each send
//! - [`AuthenticatedClient`]: sends, recovers from 401 once, decodes JSON

pub mod authenticated;
pub mod pipeline;
pub mod request;

pub use authenticated::AuthenticatedClient;
pub use request::RequestDescriptor;
