//! Mock implementations for testing.
//!
//! These implement every trait seam of the client so the session layer can be
//! exercised without a network, a home directory or a user interface.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP transport with scripted per-route responses
//! - [`InMemoryTokenStore`] - In-memory token storage with failure injection
//! - [`RecordingNavigator`] - Counts session terminations

pub mod http;
pub mod navigator;
pub mod token_store;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use navigator::RecordingNavigator;
pub use token_store::InMemoryTokenStore;
