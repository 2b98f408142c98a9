//! Token provider with silent-then-interactive fallback.

use std::sync::Arc;
use tracing::{debug, warn};

use prospect_domain::{AccessToken, AuthError, Session};

use crate::ports::IdentityClient;

use super::token_cache::TokenCache;

/// Acquires access tokens for backend requests.
///
/// Acquisition order: cache, then silent, then interactive. The silent
/// attempt avoids interrupting the user; the interactive fallback covers an
/// expired cache or a missing scope grant. There is no retry beyond the
/// single silent-to-interactive fallback; a second failure propagates.
pub struct TokenProvider<C> {
    client: Arc<C>,
    cache: TokenCache,
    scopes: Vec<String>,
}

impl<C: IdentityClient> TokenProvider<C> {
    /// Creates a provider acquiring tokens for the given scopes.
    #[must_use]
    pub const fn new(client: Arc<C>, cache: TokenCache, scopes: Vec<String>) -> Self {
        Self {
            client,
            cache,
            scopes,
        }
    }

    /// Returns a usable access token for the session's account.
    ///
    /// # Errors
    /// - `AuthError::NoAuthenticatedUser` for an anonymous session
    /// - the interactive attempt's error when both acquisition paths fail
    pub async fn get_token(&self, session: &Session) -> Result<AccessToken, AuthError> {
        let account = session.account().ok_or(AuthError::NoAuthenticatedUser)?;

        if let Some(token) = self.cache.get_valid(&account.id).await {
            debug!(account = %account.id, "token cache hit");
            return Ok(token);
        }

        match self
            .client
            .acquire_token_silent(&self.scopes, account)
            .await
        {
            Ok(token) => {
                debug!(account = %account.id, "silent token acquisition succeeded");
                self.cache.store(account.id.clone(), token.clone()).await;
                Ok(token)
            }
            Err(silent_err) => {
                warn!(
                    account = %account.id,
                    error = %silent_err,
                    "silent token acquisition failed, falling back to interactive"
                );
                let token = self.client.acquire_token_interactive(&self.scopes).await?;
                self.cache.store(account.id.clone(), token.clone()).await;
                Ok(token)
            }
        }
    }

    /// The token cache this provider writes through.
    #[must_use]
    pub const fn cache(&self) -> &TokenCache {
        &self.cache
    }
}
