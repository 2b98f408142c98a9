//! Admin dashboard use case.

use std::sync::Arc;

use prospect_domain::{FetchState, PlatformAnalytics, Session, UserPage};

use crate::ports::ApiGateway;

/// Data backing the admin dashboard: analytics grid and user directory.
///
/// Same containment rules as the customer dashboard: independent fetches,
/// per-fetch errors, aggregate loading by logical OR.
#[derive(Debug, Clone, Default)]
pub struct AdminDashboardView {
    /// Platform analytics for the stats grid.
    pub analytics: FetchState<PlatformAnalytics>,
    /// The user directory table.
    pub users: FetchState<UserPage>,
}

impl AdminDashboardView {
    /// Aggregate loading indicator.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.analytics.is_loading() || self.users.is_loading()
    }
}

/// Loads the admin dashboard: analytics and users, concurrently.
pub struct LoadAdminDashboard<G> {
    gateway: Arc<G>,
}

impl<G: ApiGateway> LoadAdminDashboard<G> {
    /// Creates the use case over an API gateway.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetches both data sets and assembles the view.
    ///
    /// The backend enforces the admin role on both endpoints; a 403 lands
    /// in the corresponding `FetchState` like any other error.
    pub async fn execute(&self, session: &Session) -> AdminDashboardView {
        let (analytics, users) = tokio::join!(
            self.gateway.admin_analytics(session),
            self.gateway.admin_users(session),
        );

        AdminDashboardView {
            analytics: FetchState::from_result(analytics),
            users: FetchState::from_result(users),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use prospect_domain::{
        Account, AccountId, Claims, DirectoryUser, ProposalDetail, ProposalPage, UserProfile,
    };

    use crate::ports::ApiError;

    struct FakeGateway {
        caller_is_admin: bool,
    }

    #[async_trait]
    impl ApiGateway for FakeGateway {
        async fn user_profile(&self, _session: &Session) -> Result<UserProfile, ApiError> {
            unimplemented!("not under test")
        }

        async fn proposals(&self, _session: &Session) -> Result<ProposalPage, ApiError> {
            unimplemented!("not under test")
        }

        async fn proposal(
            &self,
            _session: &Session,
            _id: &str,
        ) -> Result<ProposalDetail, ApiError> {
            unimplemented!("not under test")
        }

        async fn admin_users(&self, _session: &Session) -> Result<UserPage, ApiError> {
            if !self.caller_is_admin {
                return Err(ApiError::Status {
                    status: 403,
                    detail: "Admin access required".to_string(),
                });
            }
            Ok(UserPage {
                users: vec![DirectoryUser {
                    id: "user-001".to_string(),
                    name: "John Smith".to_string(),
                    email: "john.smith@example.com".to_string(),
                    role: "SuperAdmin".to_string(),
                    status: "active".to_string(),
                    last_login: None,
                }],
                total: 1,
            })
        }

        async fn admin_analytics(
            &self,
            _session: &Session,
        ) -> Result<PlatformAnalytics, ApiError> {
            if !self.caller_is_admin {
                return Err(ApiError::Status {
                    status: 403,
                    detail: "Admin access required".to_string(),
                });
            }
            Ok(PlatformAnalytics {
                total_proposals: 47,
                active_users: 23,
                proposals_this_month: 8,
                avg_completion_rate: 72,
                total_contract_value: "$85.3M".to_string(),
                win_rate: 68,
            })
        }
    }

    fn session(roles: &[&str]) -> Session {
        Session::authenticated(Account::new(
            AccountId::new("oid-1"),
            "admin@example.com",
            "Admin",
            Claims::with_roles(roles),
        ))
    }

    #[tokio::test]
    async fn test_admin_sees_analytics_and_users() {
        let use_case = LoadAdminDashboard::new(Arc::new(FakeGateway {
            caller_is_admin: true,
        }));
        let view = use_case.execute(&session(&["SuperAdmin"])).await;

        assert!(!view.is_loading());
        assert_eq!(view.analytics.value().unwrap().total_proposals, 47);
        assert_eq!(view.users.value().unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_backend_denial_surfaces_detail_per_fetch() {
        // The client gate was bypassed; the backend still says no, and its
        // detail text is what the panels show.
        let use_case = LoadAdminDashboard::new(Arc::new(FakeGateway {
            caller_is_admin: false,
        }));
        let view = use_case.execute(&session(&["CustomerUser"])).await;

        assert_eq!(view.analytics.error(), Some("Admin access required"));
        assert_eq!(view.users.error(), Some("Admin access required"));
    }
}
