//! Ending a session that can no longer be recovered.

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::traits::{SessionNavigator, TokenStore};

/// Clears stored tokens and routes the user to sign-in.
///
/// Never fails: a store that cannot be cleared is logged and the navigator is
/// still told to terminate.
#[derive(Clone)]
pub struct SessionTerminator {
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn SessionNavigator>,
}

impl SessionTerminator {
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn SessionNavigator>) -> Self {
        Self { store, navigator }
    }

    /// End the session because of `reason`.
    pub async fn terminate(&self, reason: &AuthError) {
        warn!(code = reason.error_code(), "Ending session: {}", reason);
        self.end().await;
    }

    /// End the session at the user's request.
    pub async fn sign_out(&self) {
        info!("Signing out");
        self.end().await;
    }

    async fn end(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear stored tokens: {}", e);
        }
        self.navigator.terminate();
    }
}
