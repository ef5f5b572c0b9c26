//! Single-flight token refresh.
//!
//! When a request is rejected with 401 the coordinator either starts a
//! refresh exchange, joins the one already running, or (if a refresh finished
//! after the request picked up its token) replays with the current token.
//! However many requests fail at once, at most one exchange is in flight and
//! every request that joined it observes the same outcome, in arrival order.
//!
//! The flight record sits behind a synchronous mutex that is never held across
//! an `.await`, so deciding between leading and joining is atomic.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::credentials::TokenPair;
use super::refresh_api::AuthApi;
use super::terminator::SessionTerminator;
use crate::client::RequestDescriptor;
use crate::error::AuthError;
use crate::startup::ClientConfig;
use crate::traits::{Response, TokenStore, TokenStoreError};

/// Whether a refresh exchange is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
}

/// The new access token, or why there is none.
type RefreshOutcome = Result<String, AuthError>;

struct Flight {
    state: RefreshState,
    waiters: VecDeque<oneshot::Sender<RefreshOutcome>>,
    /// Bumped on every successful refresh.
    generation: u64,
}

impl Flight {
    /// Return to IDLE and hand back every queued waiter, oldest first.
    fn settle(&mut self, succeeded: bool) -> VecDeque<oneshot::Sender<RefreshOutcome>> {
        self.state = RefreshState::Idle;
        if succeeded {
            self.generation += 1;
        }
        std::mem::take(&mut self.waiters)
    }
}

fn lock(flight: &Mutex<Flight>) -> MutexGuard<'_, Flight> {
    flight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// What a rejected request does, decided under the lock.
enum Role {
    /// Another request is refreshing; wait for its outcome.
    Wait(oneshot::Receiver<RefreshOutcome>),
    /// A refresh completed after this request's token was attached.
    Replay,
    /// Run the exchange.
    Lead,
}

/// Releases the flight if the leading task is dropped mid-exchange.
///
/// Waiters are rejected with [`AuthError::RefreshCancelled`] and the state
/// returns to IDLE so the next 401 can start over. The session is not
/// terminated: nothing is known about the refresh token.
struct LeaderGuard<'a> {
    flight: &'a Mutex<Flight>,
    settled: bool,
}

impl<'a> LeaderGuard<'a> {
    fn new(flight: &'a Mutex<Flight>) -> Self {
        Self {
            flight,
            settled: false,
        }
    }

    fn settle(&mut self, outcome: &RefreshOutcome) {
        let waiters = lock(self.flight).settle(outcome.is_ok());
        self.settled = true;

        info!(waiters = waiters.len(), success = outcome.is_ok(), "Token refresh settled");
        for waiter in waiters {
            // A waiter whose request was dropped has gone away; skip it
            let _ = waiter.send(outcome.clone());
        }
    }
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let waiters = lock(self.flight).settle(false);
        warn!(waiters = waiters.len(), "Token refresh abandoned before it settled");
        for waiter in waiters {
            let _ = waiter.send(Err(AuthError::RefreshCancelled));
        }
    }
}

/// Serializes token refresh across concurrent requests.
pub struct RefreshCoordinator {
    flight: Mutex<Flight>,
    store: Arc<dyn TokenStore>,
    api: AuthApi,
    terminator: SessionTerminator,
    config: ClientConfig,
}

impl RefreshCoordinator {
    pub fn new(
        config: &ClientConfig,
        store: Arc<dyn TokenStore>,
        api: AuthApi,
        terminator: SessionTerminator,
    ) -> Self {
        Self {
            flight: Mutex::new(Flight {
                state: RefreshState::Idle,
                waiters: VecDeque::new(),
                generation: 0,
            }),
            store,
            api,
            terminator,
            config: config.clone(),
        }
    }

    pub fn state(&self) -> RefreshState {
        lock(&self.flight).state
    }

    /// Number of requests queued behind the running refresh.
    pub fn pending_waiters(&self) -> usize {
        lock(&self.flight).waiters.len()
    }

    /// Number of successful refreshes so far.
    ///
    /// Read this before loading the token to attach, and record it on the
    /// request, so a later 401 can tell a stale token from a dead session.
    pub fn generation(&self) -> u64 {
        lock(&self.flight).generation
    }

    /// Recover from a 401 on `request`.
    ///
    /// Returns the access token to replay the request with. On error the
    /// request must fail with it; when the error ends the session the
    /// terminator has already run.
    pub async fn recover(
        &self,
        request: &mut RequestDescriptor,
        rejection: &Response,
    ) -> Result<String, AuthError> {
        if self.config.is_refresh_endpoint(&request.url) {
            let err = AuthError::Unauthorized {
                url: request.url.clone(),
                message: rejection.snippet(),
            };
            self.terminator.terminate(&err).await;
            return Err(err);
        }

        if !request.mark_retried() {
            let err = AuthError::RetryExhausted {
                url: request.url.clone(),
            };
            self.terminator.terminate(&err).await;
            return Err(err);
        }

        let role = {
            let mut flight = lock(&self.flight);
            let stale = request
                .token_generation()
                .is_some_and(|g| g < flight.generation);
            match flight.state {
                RefreshState::Refreshing => {
                    let (tx, rx) = oneshot::channel();
                    flight.waiters.push_back(tx);
                    Role::Wait(rx)
                }
                RefreshState::Idle if stale => Role::Replay,
                // The refresh token is only read once REFRESHING, off the lock.
                // Without one the leader fails straight back to IDLE and nobody
                // can observe the intermediate state.
                RefreshState::Idle => {
                    flight.state = RefreshState::Refreshing;
                    Role::Lead
                }
            }
        };

        match role {
            Role::Wait(rx) => {
                debug!(request_id = %request.id(), "Waiting for in-flight token refresh");
                rx.await.unwrap_or(Err(AuthError::RefreshCancelled))
            }
            Role::Replay => {
                debug!(request_id = %request.id(), "Token already refreshed, replaying");
                let outcome = self.current_access_token().await;
                if let Err(err) = &outcome {
                    self.terminator.terminate(err).await;
                }
                outcome
            }
            Role::Lead => self.lead(request.id()).await,
        }
    }

    async fn lead(&self, request_id: Uuid) -> RefreshOutcome {
        let mut guard = LeaderGuard::new(&self.flight);
        info!(request_id = %request_id, "Access token rejected, refreshing session");

        let outcome = self.exchange().await;
        // Tokens are cleared while still REFRESHING so a late 401 queues
        // behind this outcome instead of reusing the dead refresh token
        if let Err(err) = &outcome {
            self.terminator.terminate(err).await;
        }

        guard.settle(&outcome);
        outcome
    }

    /// Read the refresh token, exchange it under the deadline, store the result.
    async fn exchange(&self) -> RefreshOutcome {
        let refresh_token = self
            .store
            .get()
            .await
            .map_err(store_failure)?
            .as_ref()
            .and_then(TokenPair::refresh)
            .map(str::to_string)
            .ok_or(AuthError::MissingRefreshToken)?;

        let timeout = self.config.refresh_timeout;
        let pair = match tokio::time::timeout(timeout, self.api.refresh(&refresh_token)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(AuthError::RefreshTimedOut {
                    after_secs: timeout.as_secs(),
                })
            }
        };

        self.store.set(&pair).await.map_err(store_failure)?;
        Ok(pair.access_token)
    }

    /// Access token stored by the refresh that made the request stale.
    ///
    /// An empty store means that session is already gone, which is the same
    /// dead end as a refresh with no refresh token.
    async fn current_access_token(&self) -> RefreshOutcome {
        self.store
            .get()
            .await
            .map_err(store_failure)?
            .as_ref()
            .and_then(TokenPair::access)
            .map(str::to_string)
            .ok_or(AuthError::MissingRefreshToken)
    }
}

fn store_failure(err: TokenStoreError) -> AuthError {
    AuthError::CredentialsStoreFailed {
        message: err.to_string(),
    }
}
