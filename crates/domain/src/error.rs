//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A route path could not be recognized.
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
