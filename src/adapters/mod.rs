//! Concrete implementations of trait abstractions.
//!
//! Production adapters implement the traits in `crate::traits` on top of
//! reqwest and the local filesystem.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`FileTokenStore`] - Token pair stored in a JSON file
//! - [`LoggingNavigator`] - Logs session termination for headless use
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for every seam:
//! - [`mock::MockHttpClient`] - Scripted HTTP responses
//! - [`mock::InMemoryTokenStore`] - In-memory token storage
//! - [`mock::RecordingNavigator`] - Counts terminations

pub mod file_token_store;
pub mod mock;
pub mod navigator;
pub mod reqwest_http;

pub use file_token_store::FileTokenStore;
pub use mock::{InMemoryTokenStore, MockHttpClient, MockResponse, RecordingNavigator};
pub use navigator::LoggingNavigator;
pub use reqwest_http::ReqwestHttpClient;
