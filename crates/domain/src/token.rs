//! Access tokens and authentication errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bearer access token with expiry metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The access token string.
    pub token: String,
    /// Token type, usually "Bearer".
    pub token_type: String,
    /// When the token expires, if the provider reported a lifetime.
    pub expires_at: Option<DateTime<Utc>>,
    /// Scopes granted by this token.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// When this token was obtained.
    pub obtained_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a token obtained now, with an optional lifetime in seconds.
    #[must_use]
    pub fn new(
        token: String,
        token_type: String,
        expires_in_secs: Option<u64>,
        scopes: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        let expires_at =
            expires_in_secs.map(|secs| now + chrono::Duration::seconds(secs.cast_signed()));

        Self {
            token,
            token_type,
            expires_at,
            scopes,
            obtained_at: now,
        }
    }

    /// Creates a bearer token (the common case).
    #[must_use]
    pub fn bearer(token: impl Into<String>, expires_in_secs: Option<u64>) -> Self {
        Self::new(token.into(), "Bearer".to_string(), expires_in_secs, vec![])
    }

    /// Check if the token is expired or will expire within the given buffer.
    #[must_use]
    pub fn is_expired_or_expiring(&self, buffer_seconds: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            let buffer = chrono::Duration::seconds(buffer_seconds);
            Utc::now() + buffer >= expires_at
        })
    }

    /// Time until expiry in seconds, or None if no expiry.
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|exp| (exp - Utc::now()).num_seconds())
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}

/// Errors surfaced by token acquisition and login.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Token requested for an anonymous session.
    #[error("no authenticated user")]
    NoAuthenticatedUser,

    /// Cached/silent acquisition failed (expired cache, missing scope, ...).
    #[error("silent token acquisition failed: {message}")]
    SilentAcquisitionFailed {
        /// Provider error description.
        message: String,
    },

    /// Interactive acquisition failed after the silent fallback.
    #[error("interactive token acquisition failed: {message}")]
    InteractiveAcquisitionFailed {
        /// Provider error description.
        message: String,
    },

    /// Interactive sign-in failed or was declined.
    #[error("login failed: {message}")]
    LoginFailed {
        /// Provider error description.
        message: String,
    },

    /// The identity provider could not be reached.
    #[error("identity provider network error: {message}")]
    Network {
        /// Transport error description.
        message: String,
    },

    /// A token or identity response could not be understood.
    #[error("invalid token response: {message}")]
    InvalidToken {
        /// Parse error description.
        message: String,
    },
}
