//! Application routes.

use serde::{Deserialize, Serialize};

use crate::claims::Role;
use crate::error::DomainError;

/// A navigable location in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Unauthenticated entry point.
    Login,
    /// Root; redirects to the role-appropriate dashboard.
    Home,
    /// Admin dashboard (role-gated).
    Admin,
    /// Customer dashboard, the default view for authenticated users.
    Dashboard,
}

impl Route {
    /// Parses a URL path into a route. Unknown paths yield `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Self::Home),
            "/login" => Some(Self::Login),
            "/admin" => Some(Self::Admin),
            "/dashboard" => Some(Self::Dashboard),
            _ => None,
        }
    }

    /// Parses a URL path, reporting the rejected path on failure.
    ///
    /// # Errors
    /// Returns `DomainError::UnknownRoute` for paths outside the route table.
    pub fn try_parse(path: &str) -> Result<Self, DomainError> {
        Self::parse(path).ok_or_else(|| DomainError::UnknownRoute(path.to_string()))
    }

    /// The URL path for this route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Home => "/",
            Self::Admin => "/admin",
            Self::Dashboard => "/dashboard",
        }
    }

    /// Whether this route requires an authenticated session.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Role required beyond authentication, if any.
    ///
    /// The dashboard deliberately requires no role: it is the redirect
    /// target for accounts lacking a required role, so gating it would
    /// loop those accounts.
    #[must_use]
    pub const fn required_role(self) -> Option<Role> {
        match self {
            Self::Admin => Some(Role::SuperAdmin),
            Self::Login | Self::Home | Self::Dashboard => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
