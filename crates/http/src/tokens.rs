//! Access/refresh token state shared by the gateway, the route guard and the views

use crate::config::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::storage::{StorageError, TokenStorage};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;

/// The current credential pair
///
/// After any store mutation both fields are present or both are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl TokenPair {
    /// A complete pair
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access_token: Some(access.into()),
            refresh_token: Some(refresh.into()),
        }
    }

    /// Whether a session exists
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Token store backed by durable storage
///
/// Cloning is cheap and every clone observes the same state. Writes go to
/// the storage backend first and are only published in memory once the
/// backend accepted them, under the same lock readers take.
#[derive(Clone)]
pub struct TokenStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    storage: Arc<dyn TokenStorage>,
    current: RwLock<TokenPair>,
    changes: watch::Sender<TokenPair>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl TokenStore {
    /// Build a store seeded from `storage`
    ///
    /// A half-written pair left behind in storage is discarded.
    pub fn load(storage: Arc<dyn TokenStorage>) -> Self {
        let initial = match read_pair(storage.as_ref()) {
            Ok(pair) => pair,
            Err(e) => {
                warn!("Failed to load stored tokens: {e}");
                TokenPair::default()
            }
        };

        let (changes, _) = watch::channel(initial.clone());
        Self {
            inner: Arc::new(StoreInner {
                storage,
                current: RwLock::new(initial),
                changes,
            }),
        }
    }

    /// Current token pair
    pub fn tokens(&self) -> TokenPair {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current access token
    pub fn access_token(&self) -> Option<String> {
        self.tokens().access_token
    }

    /// Current refresh token
    pub fn refresh_token(&self) -> Option<String> {
        self.tokens().refresh_token
    }

    /// Whether an access token is held
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    /// Replace both tokens
    ///
    /// # Errors
    ///
    /// Returns the backend error if either key cannot be written. The
    /// previous pair stays in effect, in memory and in storage.
    pub fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), StorageError> {
        let mut current = self
            .inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let storage = self.inner.storage.as_ref();

        storage.set(ACCESS_TOKEN_KEY, access)?;
        if let Err(e) = storage.set(REFRESH_TOKEN_KEY, refresh) {
            let restored = match current.access_token.as_deref() {
                Some(previous) => storage.set(ACCESS_TOKEN_KEY, previous),
                None => storage.remove(ACCESS_TOKEN_KEY),
            };
            if let Err(rollback) = restored {
                warn!("Failed to roll back access token after write error: {rollback}");
            }
            return Err(e);
        }

        *current = TokenPair::new(access, refresh);
        self.inner.changes.send_replace(current.clone());
        debug!("Stored new token pair");
        Ok(())
    }

    /// Drop the session. Calling this while logged out is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the backend error if a key cannot be removed; in-memory state
    /// is cleared regardless so the session cannot be used any further.
    pub fn logout(&self) -> Result<(), StorageError> {
        let mut current = self
            .inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let storage = self.inner.storage.as_ref();

        let removed = storage
            .remove(ACCESS_TOKEN_KEY)
            .and(storage.remove(REFRESH_TOKEN_KEY));

        if current.is_authenticated() || current.refresh_token.is_some() {
            *current = TokenPair::default();
            self.inner.changes.send_replace(TokenPair::default());
            info!("Session cleared");
        }
        removed
    }

    /// Watch for token changes
    pub fn subscribe(&self) -> watch::Receiver<TokenPair> {
        self.inner.changes.subscribe()
    }
}

fn read_pair(storage: &dyn TokenStorage) -> Result<TokenPair, StorageError> {
    let access = storage.get(ACCESS_TOKEN_KEY)?;
    let refresh = storage.get(REFRESH_TOKEN_KEY)?;

    match (access, refresh) {
        (Some(access), Some(refresh)) => Ok(TokenPair::new(access, refresh)),
        (None, None) => Ok(TokenPair::default()),
        _ => {
            warn!("Discarding incomplete token pair found in storage");
            storage.remove(ACCESS_TOKEN_KEY)?;
            storage.remove(REFRESH_TOKEN_KEY)?;
            Ok(TokenPair::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    /// Backend whose writes to one key always fail
    struct FailingKey {
        inner: MemoryStorage,
        key: &'static str,
    }

    impl TokenStorage for FailingKey {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.key {
                return Err(StorageError::Unavailable("quota exceeded".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_set_tokens_then_get() {
        let storage = Arc::new(MemoryStorage::new());
        let store = TokenStore::load(storage.clone());

        store.set_tokens("a", "r").unwrap();

        assert_eq!(store.tokens(), TokenPair::new("a", "r"));
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("a"));
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("r"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = TokenStore::load(storage.clone());
        store.set_tokens("a", "r").unwrap();

        store.logout().unwrap();

        assert_eq!(store.tokens(), TokenPair::default());
        assert!(storage.is_empty());

        // Second logout is a no-op
        store.logout().unwrap();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_load_seeds_from_storage() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "persisted-a").unwrap();
        storage.set(REFRESH_TOKEN_KEY, "persisted-r").unwrap();

        let store = TokenStore::load(storage);
        assert_eq!(store.access_token().as_deref(), Some("persisted-a"));
        assert_eq!(store.refresh_token().as_deref(), Some("persisted-r"));
    }

    #[test]
    fn test_load_discards_partial_pair() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(ACCESS_TOKEN_KEY, "orphan").unwrap();

        let store = TokenStore::load(storage.clone());
        assert_eq!(store.tokens(), TokenPair::default());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_failed_write_keeps_previous_pair() {
        let storage = Arc::new(FailingKey {
            inner: MemoryStorage::new(),
            key: REFRESH_TOKEN_KEY,
        });
        let store = TokenStore::load(storage.clone());

        let result = store.set_tokens("a", "r");
        assert!(matches!(result, Err(StorageError::Unavailable(_))));
        assert_eq!(store.tokens(), TokenPair::default());
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let store = TokenStore::load(Arc::new(MemoryStorage::new()));
        let other = store.clone();

        store.set_tokens("a", "r").unwrap();
        assert!(other.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = TokenStore::load(Arc::new(MemoryStorage::new()));
        let mut changes = store.subscribe();

        store.set_tokens("a", "r").unwrap();
        changes.changed().await.unwrap();
        assert_eq!(changes.borrow_and_update().access_token.as_deref(), Some("a"));

        store.logout().unwrap();
        changes.changed().await.unwrap();
        assert!(!changes.borrow_and_update().is_authenticated());
    }
}
