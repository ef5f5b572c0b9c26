//! Client for the ERP sync API's authentication endpoints.
//!
//! Goes through the same [`HttpClient`] transport as every other call, so a
//! mock transport sees (and can count) refresh exchanges.

use serde::Serialize;
use std::sync::Arc;

use super::credentials::TokenPair;
use crate::error::AuthError;
use crate::startup::ClientConfig;
use crate::traits::{Headers, HttpClient, Response};

/// Body of `POST /auth/refresh`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for `/auth/refresh` and `/auth/login`.
#[derive(Clone)]
pub struct AuthApi {
    http: Arc<dyn HttpClient>,
    refresh_url: String,
    login_url: String,
}

impl AuthApi {
    /// Create an API client for the endpoints named in `config`.
    pub fn new(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Self {
        Self {
            http,
            refresh_url: config.refresh_url(),
            login_url: config.login_url(),
        }
    }

    /// Absolute URL of the refresh endpoint.
    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// POST /auth/refresh `{refreshToken}` -> `{accessToken, refreshToken}`
    ///
    /// Any non-2xx status is a rejection. The refresh token is rotated on
    /// every use, so the returned pair replaces the stored one entirely.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let body = serde_json::to_string(&RefreshRequest { refresh_token }).map_err(|e| {
            AuthError::RefreshFailed {
                message: format!("Failed to encode request: {}", e),
            }
        })?;

        let response = self
            .http
            .post(&self.refresh_url, &body, &json_headers())
            .await
            .map_err(|e| AuthError::RefreshFailed {
                message: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(AuthError::RefreshRejected {
                status: response.status,
                message: response.snippet(),
            });
        }

        parse_pair(&response).map_err(|message| AuthError::RefreshFailed { message })
    }

    /// Sign in with email and password.
    ///
    /// POST /auth/login `{email, password}` -> `{accessToken, refreshToken}`
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let body = serde_json::to_string(&SignInRequest { email, password }).map_err(|e| {
            AuthError::SignInRejected {
                status: 0,
                message: format!("Failed to encode request: {}", e),
            }
        })?;

        let response = self
            .http
            .post(&self.login_url, &body, &json_headers())
            .await
            .map_err(|e| AuthError::SignInRejected {
                status: 0,
                message: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(AuthError::SignInRejected {
                status: response.status,
                message: response.snippet(),
            });
        }

        parse_pair(&response).map_err(|message| AuthError::SignInRejected {
            status: response.status,
            message,
        })
    }
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

/// Parse a token pair, requiring a usable access token.
fn parse_pair(response: &Response) -> Result<TokenPair, String> {
    let pair: TokenPair = response.json().map_err(|e| {
        format!(
            "Invalid response format: {}. Response: {}",
            e,
            response.snippet()
        )
    })?;

    if pair.access().is_none() {
        return Err("Response did not contain an access token".to_string());
    }
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;

    fn api(mock: &MockHttpClient) -> AuthApi {
        let config = ClientConfig::new().with_api_base_url("http://erp.test");
        AuthApi::new(Arc::new(mock.clone()), &config)
    }

    #[tokio::test]
    async fn test_refresh_success_sends_camel_case_body() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "POST",
            "http://erp.test/auth/refresh",
            MockResponse::json(200, r#"{"accessToken":"new-a","refreshToken":"new-r"}"#),
        );

        let pair = api(&mock).refresh("old-r").await.unwrap();
        assert_eq!(pair, TokenPair::new("new-a", "new-r"));

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "refreshToken": "old-r" }));
        assert_eq!(
            requests[0].headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_refresh_non_2xx_is_rejection() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "POST",
            "http://erp.test/auth/refresh",
            MockResponse::json(403, r#"{"error":"revoked"}"#),
        );

        let err = api(&mock).refresh("old-r").await.unwrap_err();
        match err {
            AuthError::RefreshRejected { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("revoked"));
            }
            other => panic!("Expected RefreshRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_transport_error_is_failure() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "POST",
            "http://erp.test/auth/refresh",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let err = api(&mock).refresh("old-r").await.unwrap_err();
        assert!(matches!(err, AuthError::RefreshFailed { .. }));
    }

    #[tokio::test]
    async fn test_refresh_missing_access_token_is_failure() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "POST",
            "http://erp.test/auth/refresh",
            MockResponse::json(200, r#"{"refreshToken":"r"}"#),
        );

        let err = api(&mock).refresh("old-r").await.unwrap_err();
        assert!(matches!(err, AuthError::RefreshFailed { .. }));
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "POST",
            "http://erp.test/auth/login",
            MockResponse::json(200, r#"{"accessToken":"a","refreshToken":"r"}"#),
        );

        let pair = api(&mock).sign_in("ops@acme.test", "hunter2").await.unwrap();
        assert_eq!(pair, TokenPair::new("a", "r"));

        let body: serde_json::Value =
            serde_json::from_str(mock.get_requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["email"], "ops@acme.test");
    }

    #[tokio::test]
    async fn test_sign_in_rejected() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "POST",
            "http://erp.test/auth/login",
            MockResponse::json(401, r#"{"error":"invalid credentials"}"#),
        );

        let err = api(&mock).sign_in("ops@acme.test", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::SignInRejected { status: 401, .. }));
    }
}
