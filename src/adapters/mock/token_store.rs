//! In-memory token store for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::auth::TokenPair;
use crate::traits::{TokenStore, TokenStoreError};

/// In-memory token store for testing.
///
/// Clones share the stored pair, the failure switches and the call counters,
/// so a test can keep one handle while the client owns another.
///
/// # Example
///
/// ```ignore
/// use erpsync::adapters::mock::InMemoryTokenStore;
/// use erpsync::auth::TokenPair;
/// use erpsync::traits::TokenStore;
///
/// let store = InMemoryTokenStore::with_pair(TokenPair::new("a", "r"));
/// assert_eq!(store.get().await?.unwrap().access_token, "a");
///
/// store.clear().await?;
/// assert!(store.pair().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    pair: Arc<Mutex<Option<TokenPair>>>,
    get_should_fail: Arc<Mutex<bool>>,
    set_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
    set_calls: Arc<AtomicUsize>,
    clear_calls: Arc<AtomicUsize>,
}

impl InMemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `pair`.
    pub fn with_pair(pair: TokenPair) -> Self {
        let store = Self::new();
        store.set_pair(Some(pair));
        store
    }

    /// Configure whether get should fail.
    pub fn set_get_should_fail(&self, should_fail: bool) {
        *self.get_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether set should fail.
    pub fn set_set_should_fail(&self, should_fail: bool) {
        *self.set_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Get the current pair synchronously (for testing).
    pub fn pair(&self) -> Option<TokenPair> {
        self.pair.lock().unwrap().clone()
    }

    /// Replace the pair synchronously (for testing).
    pub fn set_pair(&self, pair: Option<TokenPair>) {
        *self.pair.lock().unwrap() = pair;
    }

    /// Number of `set` calls, including failed ones.
    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    /// Number of `clear` calls, including failed ones.
    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn get(&self) -> Result<Option<TokenPair>, TokenStoreError> {
        if *self.get_should_fail.lock().unwrap() {
            return Err(TokenStoreError::LoadFailed("Mock load failure".to_string()));
        }
        Ok(self.pair())
    }

    async fn set(&self, pair: &TokenPair) -> Result<(), TokenStoreError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if *self.set_should_fail.lock().unwrap() {
            return Err(TokenStoreError::SaveFailed("Mock save failure".to_string()));
        }
        self.set_pair(Some(pair.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        if *self.clear_should_fail.lock().unwrap() {
            return Err(TokenStoreError::ClearFailed("Mock clear failure".to_string()));
        }
        self.set_pair(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_empty() {
        let store = InMemoryTokenStore::new();
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_get_clear() {
        let store = InMemoryTokenStore::new();
        store.set(&TokenPair::new("a", "r")).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(TokenPair::new("a", "r")));

        store.clear().await.unwrap();
        assert!(store.pair().is_none());
        assert_eq!(store.set_calls(), 1);
        assert_eq!(store.clear_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryTokenStore::with_pair(TokenPair::new("a", "r"));

        store.set_get_should_fail(true);
        assert!(matches!(store.get().await, Err(TokenStoreError::LoadFailed(_))));

        store.set_set_should_fail(true);
        assert!(store.set(&TokenPair::new("b", "s")).await.is_err());
        assert_eq!(store.pair(), Some(TokenPair::new("a", "r")));

        store.set_clear_should_fail(true);
        assert!(store.clear().await.is_err());
        assert!(store.pair().is_some());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryTokenStore::new();
        let other = store.clone();
        other.set(&TokenPair::new("a", "r")).await.unwrap();
        assert!(store.pair().is_some());
    }
}
