//! Mock wiring for integration tests.
//!
//! Re-exports the library's mock adapters and builds an
//! [`AuthenticatedClient`] on top of them, keeping handles to every mock so
//! tests can script responses and inspect side effects.

pub use erpsync::adapters::mock::{
    InMemoryTokenStore, MockHttpClient, MockResponse, RecordedRequest, RecordingNavigator,
};
pub use erpsync::traits::{Headers, HttpClient, Response};

use erpsync::auth::TokenPair;
use erpsync::client::AuthenticatedClient;
use erpsync::startup::ClientConfig;
use std::sync::Arc;

use super::{test_pair, BASE_URL};

/// An authenticated client wired to mocks, plus handles to the mocks.
pub struct MockedClient {
    pub client: Arc<AuthenticatedClient>,
    pub http: MockHttpClient,
    pub store: InMemoryTokenStore,
    pub navigator: RecordingNavigator,
}

/// Builder for [`MockedClient`].
pub struct MockedClientBuilder {
    config: ClientConfig,
    pair: Option<TokenPair>,
}

impl MockedClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::new().with_api_base_url(BASE_URL),
            pair: Some(test_pair()),
        }
    }

    /// Start with this pair in the store (`None` for signed out).
    pub fn with_pair(mut self, pair: Option<TokenPair>) -> Self {
        self.pair = pair;
        self
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> MockedClient {
        let http = MockHttpClient::new();
        let store = InMemoryTokenStore::new();
        store.set_pair(self.pair);
        let navigator = RecordingNavigator::new();

        let client = AuthenticatedClient::new(
            self.config,
            Arc::new(http.clone()),
            Arc::new(store.clone()),
            Arc::new(navigator.clone()),
        );

        MockedClient {
            client: Arc::new(client),
            http,
            store,
            navigator,
        }
    }
}

impl Default for MockedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
