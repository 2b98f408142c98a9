//! API gateway port
//!
//! Defines the backend REST surface the dashboards consume.

use async_trait::async_trait;

use prospect_domain::{
    AuthError, PlatformAnalytics, ProposalDetail, ProposalPage, Session, UserPage, UserProfile,
};

/// Normalized error for backend requests.
///
/// Every non-success outcome of a gateway call collapses into one of these
/// variants; views render the `Display` text in a contained error panel.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    ///
    /// `detail` is the structured error detail from the response body when
    /// parseable, otherwise the HTTP status text. The display message is
    /// the bare detail so views show "forbidden", not "HTTP 403".
    #[error("{detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error detail shown to the user.
        detail: String,
    },

    /// The backend could not be reached.
    #[error("network error: {message}")]
    Network {
        /// Transport error description.
        message: String,
    },

    /// A success response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Parse error description.
        message: String,
    },

    /// Token acquisition failed; surfaces as a failed data fetch.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// HTTP status code, when the backend produced a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Port for the proposal-platform REST API.
///
/// All operations are reads: the client is a display surface. Every call
/// carries a bearer token for the given session; authorization is enforced
/// by the backend, which answers 403 with a detail body when the caller's
/// role is insufficient.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// `GET /api/user/profile` - profile of the authenticated user.
    async fn user_profile(&self, session: &Session) -> Result<UserProfile, ApiError>;

    /// `GET /api/proposals` - proposals visible to the caller.
    async fn proposals(&self, session: &Session) -> Result<ProposalPage, ApiError>;

    /// `GET /api/proposals/{id}` - detail view of one proposal.
    async fn proposal(&self, session: &Session, id: &str) -> Result<ProposalDetail, ApiError>;

    /// `GET /api/admin/users` - the user directory (admin only).
    async fn admin_users(&self, session: &Session) -> Result<UserPage, ApiError>;

    /// `GET /api/admin/analytics` - platform analytics (admin only).
    async fn admin_analytics(&self, session: &Session) -> Result<PlatformAnalytics, ApiError>;
}
