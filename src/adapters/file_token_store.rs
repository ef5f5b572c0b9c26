//! File-based token store adapter.
//!
//! Wraps [`TokenFileManager`] to implement [`TokenStore`].

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::auth::credentials::{TokenFileManager, TokenPair};
use crate::traits::{TokenStore, TokenStoreError};

/// File-based token store.
///
/// Tokens live in `~/.erpsync/tokens.json` unless a path is given.
///
/// # Example
///
/// ```ignore
/// use erpsync::adapters::FileTokenStore;
/// use erpsync::traits::TokenStore;
///
/// let store = FileTokenStore::new()?;
/// if let Some(pair) = store.get().await? {
///     println!("Signed in");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    manager: TokenFileManager,
}

impl FileTokenStore {
    /// Create a store at the default location.
    ///
    /// # Returns
    /// The store, or an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TokenStoreError> {
        TokenFileManager::new()
            .map(|manager| Self { manager })
            .ok_or_else(|| TokenStoreError::Other("Failed to determine home directory".to_string()))
    }

    /// Create a store backed by an explicit file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            manager: TokenFileManager::with_path(path),
        }
    }

    /// Get the path to the token file.
    pub fn token_path(&self) -> &Path {
        self.manager.token_path()
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self) -> Result<Option<TokenPair>, TokenStoreError> {
        self.manager
            .load()
            .map_err(|e| TokenStoreError::LoadFailed(e.to_string()))
    }

    async fn set(&self, pair: &TokenPair) -> Result<(), TokenStoreError> {
        self.manager
            .save(pair)
            .map_err(|e| TokenStoreError::SaveFailed(e.to_string()))
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        self.manager
            .clear()
            .map_err(|e| TokenStoreError::ClearFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_through_trait() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_path(temp_dir.path().join("tokens.json"));

        assert!(store.get().await.unwrap().is_none());

        store.set(&TokenPair::new("a", "r")).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(TokenPair::new("a", "r")));

        store.clear().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
        assert!(!store.token_path().exists());
    }

    #[tokio::test]
    async fn test_set_into_unwritable_location_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file cannot act as the parent directory
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = FileTokenStore::with_path(blocker.join("tokens.json"));

        let result = store.set(&TokenPair::new("a", "r")).await;
        assert!(matches!(result, Err(TokenStoreError::SaveFailed(_))));
    }

    #[test]
    fn test_default_location() {
        if let Ok(store) = FileTokenStore::new() {
            assert!(store.token_path().ends_with(".erpsync/tokens.json"));
        }
    }
}
