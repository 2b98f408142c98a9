//! Identity client port
//!
//! Defines the interface to the external identity provider.

use async_trait::async_trait;

use prospect_domain::{AccessToken, Account, AuthError};

/// Identity-client setup failed before any session could exist.
///
/// This is the one application-fatal error: it is presented full-screen
/// with remediation hints and is not retried.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("identity client initialization failed: {message}")]
pub struct InitializationError {
    /// Provider or configuration error description.
    pub message: String,
}

impl InitializationError {
    /// Creates an initialization error from any displayable cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Remediation hints shown alongside the fatal error screen.
    #[must_use]
    pub const fn remediation(&self) -> &'static [&'static str] {
        &[
            "Check that the identity client id and tenant id are correct",
            "Verify the redirect URI matches the app registration",
            "Confirm the identity authority is reachable from this network",
            "Clear cached authentication state and restart",
        ]
    }
}

/// Port for the external identity provider.
///
/// Mirrors the provider surface the client consumes: one-time
/// initialization, silent and interactive token acquisition, interactive
/// login/logout, and the local account cache.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Performs one-time client setup (endpoint discovery, config checks).
    ///
    /// # Errors
    /// Returns an `InitializationError` when the client or tenant
    /// configuration is unusable. Callers must treat this as fatal.
    async fn initialize(&self) -> Result<(), InitializationError>;

    /// Acquires a token without user interaction (cache or refresh flow).
    ///
    /// # Errors
    /// Returns `AuthError::SilentAcquisitionFailed` when no token can be
    /// produced without interaction; callers fall back to
    /// [`acquire_token_interactive`](Self::acquire_token_interactive).
    async fn acquire_token_silent(
        &self,
        scopes: &[String],
        account: &Account,
    ) -> Result<AccessToken, AuthError>;

    /// Acquires a token through a visible sign-in prompt.
    ///
    /// # Errors
    /// Returns `AuthError::InteractiveAcquisitionFailed` when the user
    /// declines or the provider rejects the request.
    async fn acquire_token_interactive(&self, scopes: &[String])
    -> Result<AccessToken, AuthError>;

    /// Runs an interactive sign-in and returns the signed-in account.
    ///
    /// # Errors
    /// Returns `AuthError::LoginFailed` when sign-in does not complete.
    async fn login_interactive(&self, scopes: &[String]) -> Result<Account, AuthError>;

    /// Signs the user out and clears provider-side local state.
    ///
    /// # Errors
    /// Returns an error when the provider rejects the sign-out; local
    /// state is cleared regardless.
    async fn logout_interactive(&self) -> Result<(), AuthError>;

    /// Accounts currently present in the provider's local cache.
    async fn cached_accounts(&self) -> Vec<Account>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_error_has_remediation() {
        let err = InitializationError::new("discovery document unreachable");
        assert!(!err.remediation().is_empty());
        assert!(err.to_string().contains("discovery document unreachable"));
    }
}
