//! Process startup: configuration and logging.
//!
//! - [`config`] - [`ClientConfig`] and its environment overrides
//! - [`logging`] - tracing subscriber installation

pub mod config;
pub mod logging;

pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_LOGIN_PATH, DEFAULT_REFRESH_PATH};
pub use logging::init_tracing;
