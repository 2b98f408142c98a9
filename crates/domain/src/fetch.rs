//! Per-fetch view state.
//!
//! Each data fetch owns an independent `FetchState`; a view combines them
//! with logical OR to decide its aggregate loading indicator, so partial
//! loading in any order is tolerated.

/// State of a single asynchronous data fetch, for view binding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    /// Not started.
    #[default]
    Idle,

    /// Fetch is in flight.
    Loading,

    /// Fetch completed with data.
    Ready(T),

    /// Fetch failed; the error is contained at the view boundary.
    Failed {
        /// Human-readable error message for the error panel.
        message: String,
    },
}

impl<T> FetchState<T> {
    /// Creates a failed state from any displayable error.
    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self::Failed {
            message: error.to_string(),
        }
    }

    /// Creates a state from a fetch result.
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::failed(e),
        }
    }

    /// Returns true while the fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true once data is available.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns true if the fetch failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Returns the fetched value, if ready.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the error message, if failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}
