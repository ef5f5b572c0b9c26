//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! use common::{MockedClientBuilder, refresh_url};
//!
//! let mocked = MockedClientBuilder::new().build();
//! mocked.http.set_response("POST", &refresh_url(), refresh_success("a", "r"));
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use erpsync::auth::TokenPair;

/// Base URL the mock transport answers on.
pub const BASE_URL: &str = "http://erp.test";

/// Pair stored before each test; the access token is already expired server-side.
pub fn test_pair() -> TokenPair {
    TokenPair::new("expired-access-token", "valid-refresh-token")
}

/// Pair returned by a successful refresh.
pub fn refreshed_pair() -> TokenPair {
    TokenPair::new("new-access-token", "new-refresh-token")
}

pub fn refresh_url() -> String {
    format!("{}/auth/refresh", BASE_URL)
}

pub fn api_url(path: &str) -> String {
    format!("{}{}", BASE_URL, path)
}

/// Successful refresh response carrying `pair`.
pub fn refresh_success(pair: &TokenPair) -> MockResponse {
    MockResponse::json(
        200,
        &serde_json::json!({
            "accessToken": pair.access_token,
            "refreshToken": pair.refresh_token,
        })
        .to_string(),
    )
}

/// A protected endpoint that only accepts the refreshed access token.
pub fn protected(body: &str) -> MockResponse {
    MockResponse::require_bearer(&refreshed_pair().access_token, MockResponse::json(200, body))
}
