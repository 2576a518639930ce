use crate::{
    config,
    management::{KeyValueStore, StorageError},
    types::TokenBundle,
};

/// Persists the single OAuth token bundle under a fixed key.
///
/// The bundle is only ever replaced as a whole or removed.
pub struct TokenStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, config::TOKEN_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        TokenStore {
            store,
            key: key.to_string(),
        }
    }

    /// Reads the stored bundle. Data that no longer parses is reported as
    /// `StorageError::SerdeError`.
    pub async fn load(&self) -> Result<Option<TokenBundle>, StorageError> {
        let Some(content) = self.store.get(&self.key).await? else {
            return Ok(None);
        };
        let tokens: TokenBundle = serde_json::from_str(&content)?;
        Ok(Some(tokens))
    }

    pub async fn persist(&self, tokens: &TokenBundle) -> Result<(), StorageError> {
        let json = serde_json::to_string(tokens)?;
        self.store.set(&self.key, &json).await
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key).await
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
