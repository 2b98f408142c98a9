//! In-memory token cache with expiry tracking.
//!
//! One access token per account, shared between the token provider and the
//! session controller. The cache is the only shared mutable auth state;
//! readers always get owned snapshots.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use prospect_domain::{AccessToken, AccountId};

/// Seconds before expiry at which a cached token stops being handed out.
const DEFAULT_EXPIRY_BUFFER_SECONDS: i64 = 60;

/// Thread-safe in-memory token cache keyed by account.
#[derive(Debug, Clone)]
pub struct TokenCache {
    tokens: Arc<RwLock<HashMap<AccountId, AccessToken>>>,
    /// Tokens expiring within this buffer are treated as expired.
    expiry_buffer_seconds: i64,
}

impl TokenCache {
    /// Creates a cache with the default expiry buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_expiry_buffer(DEFAULT_EXPIRY_BUFFER_SECONDS)
    }

    /// Creates a cache with a custom expiry buffer.
    #[must_use]
    pub fn with_expiry_buffer(expiry_buffer_seconds: i64) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            expiry_buffer_seconds,
        }
    }

    /// Stores a token for the given account, replacing any previous one.
    pub async fn store(&self, account: AccountId, token: AccessToken) {
        let mut tokens = self.tokens.write().await;
        tokens.insert(account, token);
    }

    /// Returns the cached token for the account if it is still usable.
    ///
    /// Tokens expired or expiring within the buffer are not returned.
    pub async fn get_valid(&self, account: &AccountId) -> Option<AccessToken> {
        let tokens = self.tokens.read().await;
        tokens.get(account).and_then(|t| {
            if t.is_expired_or_expiring(self.expiry_buffer_seconds) {
                None
            } else {
                Some(t.clone())
            }
        })
    }

    /// Removes the token for one account.
    pub async fn remove(&self, account: &AccountId) -> Option<AccessToken> {
        let mut tokens = self.tokens.write().await;
        tokens.remove(account)
    }

    /// Clears all tokens (logout).
    pub async fn clear(&self) {
        let mut tokens = self.tokens.write().await;
        tokens.clear();
    }

    /// Number of cached tokens.
    pub async fn count(&self) -> usize {
        let tokens = self.tokens.read().await;
        tokens.len()
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn account() -> AccountId {
        AccountId::new("oid-123")
    }

    #[tokio::test]
    async fn test_store_and_get_valid() {
        let cache = TokenCache::new();
        cache
            .store(account(), AccessToken::bearer("access123", Some(3600)))
            .await;

        let token = cache.get_valid(&account()).await;
        assert!(token.is_some());
        assert_eq!(token.unwrap().token, "access123");
    }

    #[tokio::test]
    async fn test_token_within_buffer_is_not_returned() {
        let cache = TokenCache::with_expiry_buffer(60);
        cache
            .store(account(), AccessToken::bearer("access123", Some(30)))
            .await;

        assert!(cache.get_valid(&account()).await.is_none());
    }

    #[tokio::test]
    async fn test_token_without_expiry_is_always_valid() {
        let cache = TokenCache::new();
        cache
            .store(account(), AccessToken::bearer("access123", None))
            .await;

        assert!(cache.get_valid(&account()).await.is_some());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let cache = TokenCache::new();
        cache
            .store(account(), AccessToken::bearer("a", Some(3600)))
            .await;
        cache
            .store(
                AccountId::new("oid-456"),
                AccessToken::bearer("b", Some(3600)),
            )
            .await;
        assert_eq!(cache.count().await, 2);

        cache.remove(&account()).await;
        assert_eq!(cache.count().await, 1);

        cache.clear().await;
        assert_eq!(cache.count().await, 0);
    }
}
