//! HTTP client that keeps the session alive.
//!
//! Every request goes out with the stored access token. A 401 hands the
//! request to the [`RefreshCoordinator`], and the request is replayed once
//! with whatever token the coordinator returns.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::pipeline;
use super::request::RequestDescriptor;
use crate::adapters::{FileTokenStore, ReqwestHttpClient};
use crate::auth::{AuthApi, RefreshCoordinator, SessionTerminator};
use crate::error::{ClientError, ClientResult, NetworkError};
use crate::startup::ClientConfig;
use crate::traits::{HttpClient, Response, SessionNavigator, TokenStore};

/// Authenticated client for the ERP sync API.
///
/// # Example
///
/// ```ignore
/// use erpsync::adapters::LoggingNavigator;
/// use erpsync::client::AuthenticatedClient;
/// use erpsync::startup::ClientConfig;
/// use std::sync::Arc;
///
/// let client = AuthenticatedClient::from_config(ClientConfig::from_env(), Arc::new(LoggingNavigator::new()))?;
/// let orders: serde_json::Value = client.get_json("/orders").await?;
/// ```
pub struct AuthenticatedClient {
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
    store: Arc<dyn TokenStore>,
    api: AuthApi,
    terminator: SessionTerminator,
    coordinator: RefreshCoordinator,
}

impl AuthenticatedClient {
    /// Wire a client from its collaborators.
    pub fn new(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn SessionNavigator>,
    ) -> Self {
        let api = AuthApi::new(http.clone(), &config);
        let terminator = SessionTerminator::new(store.clone(), navigator);
        let coordinator =
            RefreshCoordinator::new(&config, store.clone(), api.clone(), terminator.clone());

        Self {
            config,
            http,
            store,
            api,
            terminator,
            coordinator,
        }
    }

    /// Build a client on reqwest and the token file named in `config`.
    pub fn from_config(
        config: ClientConfig,
        navigator: Arc<dyn SessionNavigator>,
    ) -> ClientResult<Self> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)
            .map_err(|e| NetworkError::from_http(e, &config.api_base_url))?;
        let store = match &config.token_path {
            Some(path) => FileTokenStore::with_path(path),
            None => FileTokenStore::new()?,
        };
        debug!(path = %store.token_path().display(), "Using token file");

        Ok(Self::new(config, Arc::new(http), Arc::new(store), navigator))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    /// Send a request with the current token, recovering once from a 401.
    ///
    /// Any response other than an unrecoverable 401 is returned as-is,
    /// whatever its status.
    pub async fn send(&self, mut request: RequestDescriptor) -> ClientResult<Response> {
        let mut replay_token: Option<String> = None;

        loop {
            match replay_token.take() {
                Some(token) => pipeline::set_bearer(&mut request, Some(&token)),
                None => {
                    // Generation first: a refresh landing in between must
                    // make this token look stale, never fresh
                    let generation = self.coordinator.generation();
                    let tokens = self.store.get().await?;
                    pipeline::attach_token(&mut request, tokens.as_ref());
                    request.record_generation(generation);
                }
            }

            debug!(
                request_id = %request.id(),
                method = %request.method,
                url = %request.url,
                replay = request.is_retried(),
                "Sending request"
            );

            let response = self
                .http
                .request(
                    request.method,
                    &request.url,
                    request.body.as_deref(),
                    &request.headers,
                )
                .await
                .map_err(|e| NetworkError::from_http(e, &request.url))?;

            if !response.is_unauthorized() {
                return Ok(response);
            }

            let token = self.coordinator.recover(&mut request, &response).await?;
            replay_token = Some(token);
        }
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(RequestDescriptor::get(self.config.url(path))).await?;
        Ok(expect_success(response)?.json()?)
    }

    /// POST `body` as JSON to `path` and decode the JSON reply.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = RequestDescriptor::post(self.config.url(path)).with_json(body)?;
        let response = self.send(request).await?;
        Ok(expect_success(response)?.json()?)
    }

    /// PUT `body` as JSON to `path` and decode the JSON reply.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = RequestDescriptor::put(self.config.url(path)).with_json(body)?;
        let response = self.send(request).await?;
        Ok(expect_success(response)?.json()?)
    }

    /// DELETE `path`, ignoring any body.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self
            .send(RequestDescriptor::delete(self.config.url(path)))
            .await?;
        expect_success(response)?;
        Ok(())
    }

    /// Sign in and store the issued pair.
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<()> {
        let pair = self.api.sign_in(email, password).await?;
        self.store.set(&pair).await?;
        info!("Signed in");
        Ok(())
    }

    /// Clear the stored pair and notify the navigator.
    pub async fn sign_out(&self) {
        self.terminator.sign_out().await;
    }

    /// Whether a token pair is stored.
    pub async fn is_signed_in(&self) -> ClientResult<bool> {
        Ok(self.store.get().await?.is_some())
    }
}

fn expect_success(response: Response) -> Result<Response, ClientError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ClientError::Status {
        status: response.status,
        message: response.snippet(),
    })
}
