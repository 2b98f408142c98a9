//! Route resolution and the role gate.
//!
//! The role gate here is a UX convenience, **not a security control**: the
//! client can be inspected and modified by any user, so the authoritative
//! authorization decision is made by the backend on every API call (which
//! answers 403 when the caller's role is insufficient). This gate only
//! spares well-behaved users a forbidden view by redirecting them to the
//! dashboard they can use.

use tracing::debug;

use prospect_domain::{Role, Route, Session};

use crate::auth::SessionState;

/// A resolved view the caller should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Unauthenticated entry point.
    Login,
    /// Admin dashboard.
    AdminDashboard,
    /// Customer dashboard.
    CustomerDashboard,
}

/// Outcome of resolving a route against the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Identity client still initializing; show a loading indicator.
    Pending,

    /// Initialization failed; show the full-screen error.
    Fatal {
        /// Error text for the fatal screen.
        message: String,
    },

    /// Render this view.
    Render(View),

    /// Navigate elsewhere.
    Redirect {
        /// Where to go.
        target: Route,
        /// The originally requested route, preserved across a login
        /// redirect so it can be restored afterwards.
        return_to: Option<Route>,
    },
}

/// Decision of the role gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Render the requested view.
    Allow,
    /// Navigate to this route instead.
    Redirect(Route),
}

/// Applies the role gate to a session.
///
/// Anonymous sessions go to login. Authenticated sessions lacking the
/// required role are sent to the default dashboard rather than a forbidden
/// page. Never an error.
#[must_use]
pub fn authorize(session: &Session, required: Option<Role>) -> Gate {
    if !session.is_authenticated() {
        return Gate::Redirect(Route::Login);
    }
    if session.role().satisfies(required) {
        Gate::Allow
    } else {
        Gate::Redirect(Route::Dashboard)
    }
}

/// The role-appropriate home: admins land on the admin dashboard,
/// everyone else on the customer dashboard.
#[must_use]
pub const fn home_route(role: Role) -> Route {
    match role {
        Role::SuperAdmin => Route::Admin,
        Role::CustomerUser | Role::Unknown => Route::Dashboard,
    }
}

/// Where to navigate after a successful login.
///
/// Restores the route the user originally requested when one was preserved
/// across the login redirect, otherwise falls back to the role-based home.
#[must_use]
pub fn post_login_route(return_to: Option<Route>, role: Role) -> Route {
    return_to
        .filter(|r| r.is_protected())
        .unwrap_or_else(|| home_route(role))
}

/// Resolves a route against the current session state.
#[must_use]
pub fn resolve(state: &SessionState, route: Route) -> RouteOutcome {
    match state {
        SessionState::Initializing => RouteOutcome::Pending,
        SessionState::InitFailed { error } => RouteOutcome::Fatal {
            message: error.to_string(),
        },
        SessionState::Unauthenticated => {
            if route.is_protected() {
                RouteOutcome::Redirect {
                    target: Route::Login,
                    return_to: Some(route),
                }
            } else {
                RouteOutcome::Render(View::Login)
            }
        }
        SessionState::Authenticated(session) => resolve_authenticated(session, route),
    }
}

/// Resolves a raw URL path; unknown paths redirect to the root.
#[must_use]
pub fn resolve_path(state: &SessionState, path: &str) -> RouteOutcome {
    match Route::try_parse(path) {
        Ok(route) => resolve(state, route),
        Err(err) => {
            debug!(error = %err, "unknown path, redirecting to root");
            RouteOutcome::Redirect {
                target: Route::Home,
                return_to: None,
            }
        }
    }
}

fn resolve_authenticated(session: &Session, route: Route) -> RouteOutcome {
    match route {
        // Already signed in; the login view would be a dead end.
        Route::Login | Route::Home => RouteOutcome::Redirect {
            target: home_route(session.role()),
            return_to: None,
        },
        Route::Admin | Route::Dashboard => match authorize(session, route.required_role()) {
            Gate::Allow => RouteOutcome::Render(match route {
                Route::Admin => View::AdminDashboard,
                _ => View::CustomerDashboard,
            }),
            Gate::Redirect(target) => RouteOutcome::Redirect {
                target,
                return_to: None,
            },
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use prospect_domain::{Account, AccountId, Claims};

    use crate::ports::InitializationError;

    fn session_with_roles(roles: &[&str]) -> Session {
        Session::authenticated(Account::new(
            AccountId::new("oid-1"),
            "user@example.com",
            "User",
            Claims::with_roles(roles),
        ))
    }

    fn authenticated_state(roles: &[&str]) -> SessionState {
        SessionState::Authenticated(session_with_roles(roles))
    }

    #[test]
    fn test_initializing_blocks_all_routes() {
        for route in [Route::Login, Route::Home, Route::Admin, Route::Dashboard] {
            assert_eq!(
                resolve(&SessionState::Initializing, route),
                RouteOutcome::Pending
            );
        }
    }

    #[test]
    fn test_init_failure_is_fatal_everywhere() {
        let state = SessionState::InitFailed {
            error: InitializationError::new("bad tenant"),
        };
        assert!(matches!(
            resolve(&state, Route::Dashboard),
            RouteOutcome::Fatal { .. }
        ));
    }

    #[test]
    fn test_unauthenticated_protected_routes_redirect_to_login() {
        for route in [Route::Home, Route::Admin, Route::Dashboard] {
            assert_eq!(
                resolve(&SessionState::Unauthenticated, route),
                RouteOutcome::Redirect {
                    target: Route::Login,
                    return_to: Some(route),
                }
            );
        }
    }

    #[test]
    fn test_unauthenticated_login_renders() {
        assert_eq!(
            resolve(&SessionState::Unauthenticated, Route::Login),
            RouteOutcome::Render(View::Login)
        );
    }

    #[test]
    fn test_admin_claims_render_admin_dashboard() {
        assert_eq!(
            resolve(&authenticated_state(&["SuperAdmin"]), Route::Admin),
            RouteOutcome::Render(View::AdminDashboard)
        );
    }

    #[test]
    fn test_missing_role_redirects_to_dashboard_not_an_error() {
        assert_eq!(
            resolve(&authenticated_state(&[]), Route::Admin),
            RouteOutcome::Redirect {
                target: Route::Dashboard,
                return_to: None,
            }
        );
    }

    #[test]
    fn test_customer_role_cannot_reach_admin() {
        assert_eq!(
            resolve(&authenticated_state(&["CustomerUser"]), Route::Admin),
            RouteOutcome::Redirect {
                target: Route::Dashboard,
                return_to: None,
            }
        );
    }

    #[test]
    fn test_dashboard_requires_authentication_only() {
        // Even an account with no recognized role can use the default view;
        // anything stricter would loop the missing-role redirect.
        assert_eq!(
            resolve(&authenticated_state(&[]), Route::Dashboard),
            RouteOutcome::Render(View::CustomerDashboard)
        );
    }

    #[test]
    fn test_home_redirects_by_role() {
        assert_eq!(
            resolve(&authenticated_state(&["SuperAdmin"]), Route::Home),
            RouteOutcome::Redirect {
                target: Route::Admin,
                return_to: None,
            }
        );
        assert_eq!(
            resolve(&authenticated_state(&["CustomerUser"]), Route::Home),
            RouteOutcome::Redirect {
                target: Route::Dashboard,
                return_to: None,
            }
        );
    }

    #[test]
    fn test_authenticated_login_route_redirects_home() {
        assert_eq!(
            resolve(&authenticated_state(&["CustomerUser"]), Route::Login),
            RouteOutcome::Redirect {
                target: Route::Dashboard,
                return_to: None,
            }
        );
    }

    #[test]
    fn test_unknown_path_redirects_to_root() {
        assert_eq!(
            resolve_path(&authenticated_state(&["CustomerUser"]), "/reports/q3"),
            RouteOutcome::Redirect {
                target: Route::Home,
                return_to: None,
            }
        );
    }

    #[test]
    fn test_post_login_restores_requested_route() {
        assert_eq!(
            post_login_route(Some(Route::Admin), Role::SuperAdmin),
            Route::Admin
        );
        // No preserved route: fall back to the role-based home.
        assert_eq!(post_login_route(None, Role::CustomerUser), Route::Dashboard);
        // A preserved public route is ignored.
        assert_eq!(
            post_login_route(Some(Route::Login), Role::SuperAdmin),
            Route::Admin
        );
    }

    #[test]
    fn test_gate_redirects_anonymous_to_login() {
        assert_eq!(
            authorize(&Session::anonymous(), None),
            Gate::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_gate_allows_matching_role() {
        assert_eq!(
            authorize(&session_with_roles(&["SuperAdmin"]), Some(Role::SuperAdmin)),
            Gate::Allow
        );
    }
}
