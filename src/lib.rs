//! erpsync - session-aware HTTP client for the order-to-ERP sync API
//!
//! Requests carry the stored bearer token; on 401 the token pair is refreshed
//! once for all concurrent callers and each request is replayed at most once.

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod client;
pub mod error;
pub mod startup;
pub mod traits;
