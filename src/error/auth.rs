//! Authentication-related error types.
//!
//! This module defines the failures of the session layer: expired or
//! rejected credentials, failed refresh exchanges, and token storage
//! problems surfaced while refreshing.

use std::fmt;

/// Authentication-specific error variants.
///
/// `Clone` so one refresh outcome can be handed to every waiting request.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// A request was rejected with 401 and cannot be recovered by refreshing
    /// (for example the refresh endpoint itself answered 401).
    Unauthorized { url: String, message: String },

    /// A request that was already replayed once received 401 again.
    RetryExhausted { url: String },

    /// No refresh token is stored, so no exchange was attempted.
    MissingRefreshToken,

    /// The refresh endpoint answered with a non-2xx status.
    RefreshRejected { status: u16, message: String },

    /// The refresh exchange failed before producing a verdict
    /// (transport failure, unreadable response).
    RefreshFailed { message: String },

    /// The refresh exchange did not settle within the deadline.
    RefreshTimedOut { after_secs: u64 },

    /// The task driving the refresh was dropped before it settled.
    RefreshCancelled,

    /// Tokens could not be read or written while refreshing.
    CredentialsStoreFailed { message: String },

    /// No tokens are stored (user not signed in or already signed out).
    NotAuthenticated,

    /// Sign-in was rejected by the server.
    SignInRejected { status: u16, message: String },
}

impl AuthError {
    /// Check if the user has to sign in again before continuing.
    pub fn requires_reauth(&self) -> bool {
        !matches!(self, AuthError::RefreshCancelled)
    }

    /// Check if the session layer terminated the session for this error.
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            AuthError::Unauthorized { .. }
                | AuthError::RetryExhausted { .. }
                | AuthError::MissingRefreshToken
                | AuthError::RefreshRejected { .. }
                | AuthError::RefreshFailed { .. }
                | AuthError::RefreshTimedOut { .. }
                | AuthError::CredentialsStoreFailed { .. }
        )
    }

    /// Check if this error came out of a refresh exchange.
    pub fn is_refresh_failure(&self) -> bool {
        matches!(
            self,
            AuthError::MissingRefreshToken
                | AuthError::RefreshRejected { .. }
                | AuthError::RefreshFailed { .. }
                | AuthError::RefreshTimedOut { .. }
                | AuthError::RefreshCancelled
                | AuthError::CredentialsStoreFailed { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Unauthorized { .. } | AuthError::RetryExhausted { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::MissingRefreshToken | AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            AuthError::RefreshRejected { .. } => {
                "Your session could not be renewed. Please sign in again.".to_string()
            }
            AuthError::RefreshFailed { .. } | AuthError::RefreshTimedOut { .. } => {
                "Failed to renew your session. Please sign in again.".to_string()
            }
            AuthError::RefreshCancelled => {
                "The session renewal was interrupted. Please retry.".to_string()
            }
            AuthError::CredentialsStoreFailed { .. } => {
                "Could not access your stored session. Please sign in again.".to_string()
            }
            AuthError::SignInRejected { status, .. } => match *status {
                401 | 403 => "Invalid email or password.".to_string(),
                _ => "Sign-in failed. Please try again.".to_string(),
            },
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthorized { .. } => "E_AUTH_UNAUTHORIZED",
            AuthError::RetryExhausted { .. } => "E_AUTH_RETRY_EXHAUSTED",
            AuthError::MissingRefreshToken => "E_AUTH_NO_REFRESH",
            AuthError::RefreshRejected { .. } => "E_AUTH_REFRESH_REJECTED",
            AuthError::RefreshFailed { .. } => "E_AUTH_REFRESH_FAIL",
            AuthError::RefreshTimedOut { .. } => "E_AUTH_REFRESH_TIMEOUT",
            AuthError::RefreshCancelled => "E_AUTH_REFRESH_CANCELLED",
            AuthError::CredentialsStoreFailed { .. } => "E_AUTH_STORE",
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
            AuthError::SignInRejected { .. } => "E_AUTH_SIGN_IN",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Unauthorized { url, message } => {
                write!(f, "Unauthorized request to {}: {}", url, message)
            }
            AuthError::RetryExhausted { url } => {
                write!(f, "Request to {} was rejected again after token refresh", url)
            }
            AuthError::MissingRefreshToken => write!(f, "No refresh token available"),
            AuthError::RefreshRejected { status, message } => {
                write!(f, "Token refresh rejected ({}): {}", status, message)
            }
            AuthError::RefreshFailed { message } => write!(f, "Token refresh failed: {}", message),
            AuthError::RefreshTimedOut { after_secs } => {
                write!(f, "Token refresh timed out after {}s", after_secs)
            }
            AuthError::RefreshCancelled => write!(f, "Token refresh was cancelled"),
            AuthError::CredentialsStoreFailed { message } => {
                write!(f, "Token store failure: {}", message)
            }
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::SignInRejected { status, message } => {
                write!(f, "Sign-in rejected ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_rejected() {
        let err = AuthError::RefreshRejected {
            status: 403,
            message: "revoked".to_string(),
        };
        assert!(err.requires_reauth());
        assert!(err.is_refresh_failure());
        assert_eq!(err.error_code(), "E_AUTH_REFRESH_REJECTED");
        assert_eq!(err.to_string(), "Token refresh rejected (403): revoked");
        assert!(err.user_message().contains("sign in again"));
    }

    #[test]
    fn test_retry_exhausted() {
        let err = AuthError::RetryExhausted {
            url: "http://api/orders".to_string(),
        };
        assert!(err.requires_reauth());
        assert!(!err.is_refresh_failure());
        assert!(err.to_string().contains("http://api/orders"));
    }

    #[test]
    fn test_ends_session() {
        assert!(AuthError::MissingRefreshToken.ends_session());
        assert!(AuthError::RefreshTimedOut { after_secs: 15 }.ends_session());
        assert!(!AuthError::RefreshCancelled.ends_session());
        assert!(!AuthError::NotAuthenticated.ends_session());
    }

    #[test]
    fn test_cancelled_does_not_require_reauth() {
        let err = AuthError::RefreshCancelled;
        assert!(!err.requires_reauth());
        assert!(err.is_refresh_failure());
        assert!(err.user_message().contains("interrupted"));
    }

    #[test]
    fn test_timeout_display() {
        let err = AuthError::RefreshTimedOut { after_secs: 15 };
        assert_eq!(err.to_string(), "Token refresh timed out after 15s");
        assert_eq!(err.error_code(), "E_AUTH_REFRESH_TIMEOUT");
    }

    #[test]
    fn test_sign_in_rejected_message() {
        let err = AuthError::SignInRejected {
            status: 401,
            message: "bad password".to_string(),
        };
        assert_eq!(err.user_message(), "Invalid email or password.");

        let err = AuthError::SignInRejected {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(err.user_message().contains("try again"));
    }

    #[test]
    fn test_clone_preserves_equality() {
        let err = AuthError::MissingRefreshToken;
        assert_eq!(err.clone(), err);
    }

    #[test]
    fn test_error_codes_unique() {
        let errors = vec![
            AuthError::Unauthorized {
                url: String::new(),
                message: String::new(),
            },
            AuthError::RetryExhausted { url: String::new() },
            AuthError::MissingRefreshToken,
            AuthError::RefreshRejected {
                status: 0,
                message: String::new(),
            },
            AuthError::RefreshFailed {
                message: String::new(),
            },
            AuthError::RefreshTimedOut { after_secs: 0 },
            AuthError::RefreshCancelled,
            AuthError::CredentialsStoreFailed {
                message: String::new(),
            },
            AuthError::NotAuthenticated,
            AuthError::SignInRejected {
                status: 0,
                message: String::new(),
            },
        ];

        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.error_code()).collect();
        assert_eq!(codes.len(), errors.len());
    }
}
