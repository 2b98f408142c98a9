//! Session state machine and controller.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use prospect_domain::{Session, AuthError};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{IdentityClient, InitializationError};

use super::token_cache::TokenCache;

/// State of the authenticated-session machine.
///
/// Transitions:
/// `Initializing -> Unauthenticated | Authenticated | InitFailed`,
/// `Unauthenticated -> Authenticated` on login,
/// `Authenticated -> Unauthenticated` on logout or token-cache clear.
/// `InitFailed` is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Identity client not yet initialized; all routes blocked.
    #[default]
    Initializing,

    /// Identity-client setup failed; terminal.
    InitFailed {
        /// The fatal error, kept for the full-screen view.
        error: InitializationError,
    },

    /// No signed-in account; protected routes redirect to login.
    Unauthenticated,

    /// A signed-in account; protected routes render per the role gate.
    Authenticated(Session),
}

impl SessionState {
    /// Returns true once a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// A session snapshot for the current state.
    ///
    /// Anything but `Authenticated` yields the anonymous session.
    #[must_use]
    pub fn session(&self) -> Session {
        match self {
            Self::Authenticated(session) => session.clone(),
            _ => Session::anonymous(),
        }
    }
}

/// Owns the session state and drives its transitions.
///
/// Constructed explicitly and passed down; never a module-level singleton.
/// The state is mutated only here and by the token cache it shares with the
/// token provider; readers take immutable snapshots.
pub struct SessionController<C> {
    client: Arc<C>,
    cache: TokenCache,
    scopes: Vec<String>,
    state: RwLock<SessionState>,
}

impl<C: IdentityClient> SessionController<C> {
    /// Creates a controller in the `Initializing` state.
    #[must_use]
    pub fn new(client: Arc<C>, cache: TokenCache, scopes: Vec<String>) -> Self {
        Self {
            client,
            cache,
            scopes,
            state: RwLock::new(SessionState::Initializing),
        }
    }

    /// Current state snapshot.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Current session snapshot.
    pub async fn session(&self) -> Session {
        self.state.read().await.session()
    }

    /// Performs one-time identity-client setup.
    ///
    /// On failure the machine enters the terminal `InitFailed` state and the
    /// error is returned for the full-screen remediation view.
    ///
    /// # Errors
    /// Returns `ApplicationError::Initialization` when setup fails.
    pub async fn initialize(&self) -> ApplicationResult<()> {
        match self.client.initialize().await {
            Ok(()) => {
                debug!("identity client initialized");
                *self.state.write().await = SessionState::Unauthenticated;
                Ok(())
            }
            Err(init_err) => {
                error!(error = %init_err, "identity client initialization failed");
                *self.state.write().await = SessionState::InitFailed {
                    error: init_err.clone(),
                };
                Err(ApplicationError::Initialization(init_err))
            }
        }
    }

    /// Adopts a cached account, if the provider has one.
    ///
    /// Returns the resulting state. Does nothing in `Initializing` or
    /// `InitFailed`.
    pub async fn restore(&self) -> SessionState {
        {
            let state = self.state.read().await;
            if matches!(
                *state,
                SessionState::Initializing | SessionState::InitFailed { .. }
            ) {
                return state.clone();
            }
        }

        if let Some(account) = self.client.cached_accounts().await.into_iter().next() {
            debug!(account = %account.id, "restored cached account");
            let next = SessionState::Authenticated(Session::authenticated(account));
            *self.state.write().await = next.clone();
            next
        } else {
            self.state.read().await.clone()
        }
    }

    /// Runs an interactive sign-in.
    ///
    /// # Errors
    /// Returns `ApplicationError::Authentication` when the login fails or
    /// the controller is not in a usable state. The state is unchanged on
    /// failure; the user may retry.
    pub async fn login(&self) -> ApplicationResult<Session> {
        {
            let state = self.state.read().await;
            match &*state {
                SessionState::InitFailed { error } => {
                    return Err(ApplicationError::Initialization(error.clone()));
                }
                // Nothing is allowed through until initialization settles.
                SessionState::Initializing => {
                    return Err(ApplicationError::Authentication {
                        message: "identity client is still initializing".to_string(),
                    });
                }
                SessionState::Unauthenticated | SessionState::Authenticated(_) => {}
            }
        }

        match self.client.login_interactive(&self.scopes).await {
            Ok(account) => {
                info!(account = %account.id, user = %account.username, "login succeeded");
                let session = Session::authenticated(account);
                *self.state.write().await = SessionState::Authenticated(session.clone());
                Ok(session)
            }
            Err(err) => {
                debug!(error = %err, "login failed");
                Err(ApplicationError::Authentication {
                    message: err.to_string(),
                })
            }
        }
    }

    /// Signs out, clearing the token cache and provider-side state.
    ///
    /// The local session always ends, even when the provider-side sign-out
    /// reports an error.
    ///
    /// # Errors
    /// Returns the provider error after local state is cleared.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.cache.clear().await;
        *self.state.write().await = SessionState::Unauthenticated;
        let result = self.client.logout_interactive().await;
        if let Err(ref err) = result {
            debug!(error = %err, "provider-side logout failed");
        }
        info!("logged out");
        result
    }

    /// Scopes requested for this application.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use prospect_domain::{AccessToken, Account, AccountId, Claims};

    struct FakeIdentityClient {
        init_fails: bool,
        login_fails: bool,
        cached: Vec<Account>,
    }

    impl FakeIdentityClient {
        const fn good() -> Self {
            Self {
                init_fails: false,
                login_fails: false,
                cached: vec![],
            }
        }
    }

    fn customer_account() -> Account {
        Account::new(
            AccountId::new("oid-456"),
            "user@example.com",
            "User Example",
            Claims::with_roles(&["CustomerUser"]),
        )
    }

    #[async_trait]
    impl IdentityClient for FakeIdentityClient {
        async fn initialize(&self) -> Result<(), InitializationError> {
            if self.init_fails {
                Err(InitializationError::new("tenant id malformed"))
            } else {
                Ok(())
            }
        }

        async fn acquire_token_silent(
            &self,
            _scopes: &[String],
            _account: &Account,
        ) -> Result<AccessToken, AuthError> {
            Ok(AccessToken::bearer("token", Some(3600)))
        }

        async fn acquire_token_interactive(
            &self,
            _scopes: &[String],
        ) -> Result<AccessToken, AuthError> {
            Ok(AccessToken::bearer("token", Some(3600)))
        }

        async fn login_interactive(&self, _scopes: &[String]) -> Result<Account, AuthError> {
            if self.login_fails {
                Err(AuthError::LoginFailed {
                    message: "user closed the prompt".to_string(),
                })
            } else {
                Ok(customer_account())
            }
        }

        async fn logout_interactive(&self) -> Result<(), AuthError> {
            Ok(())
        }

        async fn cached_accounts(&self) -> Vec<Account> {
            self.cached.clone()
        }
    }

    fn controller(client: FakeIdentityClient) -> SessionController<FakeIdentityClient> {
        SessionController::new(Arc::new(client), TokenCache::new(), vec![])
    }

    #[tokio::test]
    async fn test_starts_initializing() {
        let controller = controller(FakeIdentityClient::good());
        assert_eq!(controller.state().await, SessionState::Initializing);
        assert!(!controller.session().await.is_authenticated());
    }

    #[tokio::test]
    async fn test_initialize_success_reaches_unauthenticated() {
        let controller = controller(FakeIdentityClient::good());
        controller.initialize().await.unwrap();
        assert_eq!(controller.state().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_initialize_failure_is_terminal() {
        let controller = controller(FakeIdentityClient {
            init_fails: true,
            ..FakeIdentityClient::good()
        });
        let err = controller.initialize().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Initialization(_)));
        assert!(matches!(
            controller.state().await,
            SessionState::InitFailed { .. }
        ));

        // Login is refused in the terminal state.
        let err = controller.login().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Initialization(_)));
    }

    #[tokio::test]
    async fn test_login_refused_while_initializing() {
        let controller = controller(FakeIdentityClient::good());
        let err = controller.login().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Authentication { .. }));
        assert_eq!(controller.state().await, SessionState::Initializing);
    }

    #[tokio::test]
    async fn test_login_transitions_to_authenticated() {
        let controller = controller(FakeIdentityClient::good());
        controller.initialize().await.unwrap();
        let session = controller.login().await.unwrap();
        assert!(session.is_authenticated());
        assert!(controller.state().await.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_login_leaves_state_unchanged() {
        let controller = controller(FakeIdentityClient {
            login_fails: true,
            ..FakeIdentityClient::good()
        });
        controller.initialize().await.unwrap();
        let err = controller.login().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Authentication { .. }));
        assert_eq!(controller.state().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_restore_adopts_cached_account() {
        let controller = controller(FakeIdentityClient {
            cached: vec![customer_account()],
            ..FakeIdentityClient::good()
        });
        controller.initialize().await.unwrap();
        let state = controller.restore().await;
        assert!(state.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_cache_and_session() {
        let controller = controller(FakeIdentityClient::good());
        controller.initialize().await.unwrap();
        controller.login().await.unwrap();

        let account_id = AccountId::new("oid-456");
        controller
            .cache
            .store(account_id, AccessToken::bearer("token", Some(3600)))
            .await;

        controller.logout().await.unwrap();
        assert_eq!(controller.state().await, SessionState::Unauthenticated);
        assert_eq!(controller.cache.count().await, 0);
    }
}
