//! Unified error type returned by the authenticated client.

use thiserror::Error;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::network::NetworkError;
use crate::traits::TokenStoreError;

/// Anything that can go wrong between a caller and the ERP sync API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Session-layer failure (expired or rejected credentials).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Transport failure below the HTTP status level.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Non-2xx response other than an unrecoverable 401.
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Token storage could not be read or written.
    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    /// Request or response body was not valid JSON for the expected type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Classify the error for retry and messaging decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Auth(_) => ErrorCategory::Auth,
            ClientError::Network(_) => ErrorCategory::Network,
            ClientError::Status { status, .. } if *status >= 500 => ErrorCategory::Server,
            ClientError::Status { .. } | ClientError::Json(_) => ErrorCategory::Client,
            ClientError::TokenStore(_) => ErrorCategory::Storage,
        }
    }

    /// Check if the operation can be retried as-is.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(err) => err.is_retryable(),
            ClientError::Status { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            _ => false,
        }
    }

    /// The auth failure behind this error, if any.
    pub fn auth_error(&self) -> Option<&AuthError> {
        match self {
            ClientError::Auth(err) => Some(err),
            _ => None,
        }
    }

    /// Check if the session was ended and the user has to sign in again.
    pub fn terminated_session(&self) -> bool {
        self.auth_error().is_some_and(AuthError::ends_session)
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Auth(err) => err.user_message(),
            ClientError::Network(err) => err.user_message(),
            ClientError::Status { status, .. } => match *status {
                403 => "You don't have permission for this action.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The server is experiencing issues. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            ClientError::TokenStore(_) => {
                "Could not access your stored session.".to_string()
            }
            ClientError::Json(_) => "Received an unexpected response from the server.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Auth(err) => err.error_code(),
            ClientError::Network(err) => err.error_code(),
            ClientError::Status { .. } => "E_HTTP_STATUS",
            ClientError::TokenStore(_) => "E_TOKEN_STORE",
            ClientError::Json(_) => "E_JSON",
        }
    }
}
