//! Application error types

use thiserror::Error;
use prospect_domain::AuthError;

use crate::ports::{ApiError, InitializationError};

/// Application-level errors.
///
/// Only `Initialization` is treated as fatal; everything else is either
/// recoverable (a login can be retried) or contained at the view boundary
/// (token and API failures surface as a failed data fetch).
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Identity-client setup failed. Fatal; shown full-screen with
    /// remediation hints, never silently retried.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// An interactive login attempt failed. The user may retry.
    #[error("authentication failed: {message}")]
    Authentication {
        /// Provider error description.
        message: String,
    },

    /// Token acquisition failed after the silent and interactive attempts.
    #[error(transparent)]
    Token(#[from] AuthError),

    /// A backend request failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
