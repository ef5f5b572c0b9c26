//! Token store trait abstraction.
//!
//! The token store exclusively owns the access/refresh pair. Everything else
//! reads and writes through this interface and never keeps its own copy.

use async_trait::async_trait;

use crate::auth::TokenPair;

/// Token store operation errors.
#[derive(Debug, Clone)]
pub enum TokenStoreError {
    /// Failed to load the token pair
    LoadFailed(String),
    /// Failed to save the token pair
    SaveFailed(String),
    /// Failed to clear the token pair
    ClearFailed(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for TokenStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStoreError::LoadFailed(msg) => write!(f, "Failed to load tokens: {}", msg),
            TokenStoreError::SaveFailed(msg) => write!(f, "Failed to save tokens: {}", msg),
            TokenStoreError::ClearFailed(msg) => write!(f, "Failed to clear tokens: {}", msg),
            TokenStoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            TokenStoreError::Other(msg) => write!(f, "Token store error: {}", msg),
        }
    }
}

impl std::error::Error for TokenStoreError {}

/// Persists, retrieves and clears the access/refresh token pair.
///
/// # Example
///
/// ```ignore
/// use erpsync::traits::TokenStore;
///
/// async fn bearer<S: TokenStore>(store: &S) -> Option<String> {
///     let pair = store.get().await.ok()??;
///     Some(format!("Bearer {}", pair.access_token))
/// }
/// ```
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the stored pair.
    ///
    /// # Returns
    /// - `Ok(Some(pair))` if a pair is stored
    /// - `Ok(None)` if nothing is stored
    /// - `Err(error)` if loading failed
    async fn get(&self) -> Result<Option<TokenPair>, TokenStoreError>;

    /// Replace the stored pair.
    async fn set(&self, pair: &TokenPair) -> Result<(), TokenStoreError>;

    /// Remove the stored pair. Succeeds when nothing is stored.
    async fn clear(&self) -> Result<(), TokenStoreError>;
}
