//! Customer dashboard use case.

use std::sync::Arc;

use prospect_domain::{FetchState, ProposalPage, ProposalStats, Session, UserProfile};

use crate::ports::ApiGateway;

/// Data backing the customer dashboard.
///
/// Profile and proposals are independent fetches: either may land first,
/// either may fail, and a failure in one never hides the other. Errors stay
/// inside their `FetchState` and are rendered as contained panels.
#[derive(Debug, Clone, Default)]
pub struct CustomerDashboardView {
    /// The user's profile for the welcome header.
    pub profile: FetchState<UserProfile>,
    /// The proposal list.
    pub proposals: FetchState<ProposalPage>,
    /// Aggregate stats for the stats grid, derived once proposals arrive.
    pub stats: Option<ProposalStats>,
}

impl CustomerDashboardView {
    /// Aggregate loading indicator: the OR of the independent fetches.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.profile.is_loading() || self.proposals.is_loading()
    }
}

/// Loads the customer dashboard: profile and proposals, concurrently.
pub struct LoadCustomerDashboard<G> {
    gateway: Arc<G>,
}

impl<G: ApiGateway> LoadCustomerDashboard<G> {
    /// Creates the use case over an API gateway.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetches both data sets and assembles the view.
    pub async fn execute(&self, session: &Session) -> CustomerDashboardView {
        let (profile, proposals) = tokio::join!(
            self.gateway.user_profile(session),
            self.gateway.proposals(session),
        );

        let proposals = FetchState::from_result(proposals);
        let stats = proposals.value().map(ProposalStats::from_page);

        CustomerDashboardView {
            profile: FetchState::from_result(profile),
            proposals,
            stats,
        }
    }
}
