//! Client configuration.
//!
//! Defaults suit a local development API; [`ClientConfig::from_env`] picks up
//! overrides for deployed environments.

use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

/// Default base URL of the ERP sync API.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Path of the token refresh endpoint.
pub const DEFAULT_REFRESH_PATH: &str = "/auth/refresh";

/// Path of the sign-in endpoint.
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";

const DEFAULT_REFRESH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`AuthenticatedClient`](crate::client::AuthenticatedClient).
///
/// # Example
///
/// ```ignore
/// use erpsync::startup::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_api_base_url("https://sync.example.com/api")
///     .with_refresh_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL every request path is joined onto
    pub api_base_url: String,
    /// Path of the token refresh endpoint
    pub refresh_path: String,
    /// Path of the sign-in endpoint
    pub login_path: String,
    /// Deadline for one refresh exchange
    pub refresh_timeout: Duration,
    /// Per-request transport timeout
    pub request_timeout: Duration,
    /// Token file location (defaults to `~/.erpsync/tokens.json`)
    pub token_path: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            refresh_timeout: Duration::from_secs(DEFAULT_REFRESH_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            token_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the refresh endpoint path.
    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    /// Set the sign-in endpoint path.
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Set the refresh exchange deadline.
    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Set the per-request transport timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the token file location.
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Set the fallback log filter.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Build a config from `ERPSYNC_*` environment variables.
    ///
    /// Unset variables keep their defaults; unparsable timeouts fall back to
    /// the defaults as well.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("ERPSYNC_API_URL") {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().to_string();
            }
        }
        if let Some(secs) = env_secs("ERPSYNC_REFRESH_TIMEOUT_SECS") {
            config.refresh_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_secs("ERPSYNC_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(path) = std::env::var("ERPSYNC_TOKEN_PATH") {
            if !path.trim().is_empty() {
                config.token_path = Some(PathBuf::from(path.trim()));
            }
        }
        if let Ok(level) = std::env::var("ERPSYNC_LOG") {
            if !level.trim().is_empty() {
                config.log_level = level.trim().to_string();
            }
        }

        config
    }

    /// Join a path onto the base URL. Absolute URLs are returned unchanged.
    pub fn url(&self, path: &str) -> String {
        match self.resolve(path) {
            Some(url) => url.into(),
            // Unparsable base; left for the transport to reject
            None => format!(
                "{}/{}",
                self.api_base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
        }
    }

    /// Absolute URL of the refresh endpoint.
    pub fn refresh_url(&self) -> String {
        self.url(&self.refresh_path)
    }

    /// Absolute URL of the sign-in endpoint.
    pub fn login_url(&self) -> String {
        self.url(&self.login_path)
    }

    /// Check whether a request URL targets the refresh endpoint.
    ///
    /// Scheme, host and port must match the API base, and the path must equal
    /// the refresh path exactly. Query string and trailing slash are ignored.
    pub fn is_refresh_endpoint(&self, url: &str) -> bool {
        if self.refresh_path.trim_matches('/').is_empty() {
            return false;
        }
        let (Some(refresh), Some(target)) = (self.resolve(&self.refresh_path), self.resolve(url))
        else {
            return false;
        };
        refresh.origin() == target.origin()
            && refresh.path().trim_end_matches('/') == target.path().trim_end_matches('/')
    }

    /// Base URL with a trailing slash, so joins append instead of replacing
    /// its last segment.
    fn base_url(&self) -> Option<Url> {
        let mut base = Url::parse(self.api_base_url.trim()).ok()?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Some(base)
    }

    fn resolve(&self, path: &str) -> Option<Url> {
        self.base_url()?.join(path.trim_start_matches('/')).ok()
    }
}

fn env_secs(name: &str) -> Option<u64> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(secs),
        _ => {
            tracing::warn!(variable = name, value = %value, "Ignoring invalid timeout");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.refresh_path, "/auth/refresh");
        assert_eq!(config.refresh_timeout, Duration::from_secs(15));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.token_path.is_none());
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_api_base_url("https://sync.example.com/api/")
            .with_refresh_timeout(Duration::from_secs(3))
            .with_token_path("/tmp/tokens.json")
            .with_log_level("debug");

        assert_eq!(config.api_base_url, "https://sync.example.com/api/");
        assert_eq!(config.refresh_timeout, Duration::from_secs(3));
        assert_eq!(config.token_path, Some(PathBuf::from("/tmp/tokens.json")));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::new().with_api_base_url("https://sync.example.com/api/");
        assert_eq!(config.url("/orders"), "https://sync.example.com/api/orders");
        assert_eq!(config.url("orders"), "https://sync.example.com/api/orders");
        assert_eq!(
            config.refresh_url(),
            "https://sync.example.com/api/auth/refresh"
        );
        assert_eq!(
            config.url("http://other.example.com/x"),
            "http://other.example.com/x"
        );
        assert_eq!(
            config.url("/orders?since=2024-01-01"),
            "https://sync.example.com/api/orders?since=2024-01-01"
        );

        let bare = ClientConfig::new().with_api_base_url("http://erp.test");
        assert_eq!(bare.url("/orders"), "http://erp.test/orders");
        assert_eq!(bare.refresh_url(), "http://erp.test/auth/refresh");
    }

    #[test]
    fn test_is_refresh_endpoint() {
        let config = ClientConfig::new().with_api_base_url("https://sync.example.com/api");
        assert!(config.is_refresh_endpoint("https://sync.example.com/api/auth/refresh"));
        assert!(config.is_refresh_endpoint("https://sync.example.com/api/auth/refresh/"));
        assert!(config.is_refresh_endpoint("https://sync.example.com/api/auth/refresh?x=1"));
        assert!(config.is_refresh_endpoint("/auth/refresh"));
        assert!(!config.is_refresh_endpoint("https://sync.example.com/api/orders"));
        assert!(!config.is_refresh_endpoint("https://sync.example.com/api/auth/login"));
        assert!(!config.is_refresh_endpoint("https://auth.refresh.example.com/"));
    }

    #[test]
    fn test_refresh_endpoint_requires_same_origin_and_exact_path() {
        let config = ClientConfig::new().with_api_base_url("http://erp.test");
        assert!(config.is_refresh_endpoint("http://erp.test/auth/refresh"));
        assert!(!config.is_refresh_endpoint("https://other.example/auth/refresh"));
        assert!(!config.is_refresh_endpoint("https://erp.test/auth/refresh"));
        assert!(!config.is_refresh_endpoint("http://erp.test:8080/auth/refresh"));
        assert!(!config.is_refresh_endpoint("http://erp.test/tenants/7/auth/refresh"));
        assert!(!config.is_refresh_endpoint("http://erp.test/auth/refresh/extra"));
    }

    #[test]
    fn test_empty_refresh_path_matches_nothing() {
        let config = ClientConfig::new()
            .with_api_base_url("http://erp.test")
            .with_refresh_path("");
        assert!(!config.is_refresh_endpoint("http://erp.test/"));
    }
}
