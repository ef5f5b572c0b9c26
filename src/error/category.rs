//! Coarse classification of client errors.

use std::fmt;

/// What kind of failure a [`ClientError`](super::ClientError) represents.
///
/// Callers use the category to decide between retrying, showing the login
/// boundary, or reporting a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection problems and timeouts. Usually transient.
    Network,

    /// Credentials rejected or session ended.
    Auth,

    /// The API answered with a 5xx status.
    Server,

    /// The API rejected the request (4xx other than 401), or the response
    /// could not be decoded.
    Client,

    /// Local token storage failed.
    Storage,
}

impl ErrorCategory {
    /// Returns true if the operation can be retried as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label for log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Storage => "storage",
        }
    }

    /// Suggested next step for the user.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => "Sign in again to continue",
            ErrorCategory::Server => "The ERP sync service may be unavailable. Try again later",
            ErrorCategory::Client => "The request was not accepted. Please report this if it persists",
            ErrorCategory::Storage => "Check permissions on the token file",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::Storage.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Auth.to_string(), "auth");
        assert_eq!(ErrorCategory::Storage.to_string(), "storage");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Network.recovery_hint().contains("internet"));
        assert!(ErrorCategory::Auth.recovery_hint().contains("Sign in"));
    }
}
