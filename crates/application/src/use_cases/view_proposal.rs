//! Proposal detail use case.

use std::sync::Arc;

use prospect_domain::{ProposalDetail, Session};

use crate::ports::{ApiError, ApiGateway};

/// Loads the detail view of a single proposal.
pub struct ViewProposal<G> {
    gateway: Arc<G>,
}

impl<G: ApiGateway> ViewProposal<G> {
    /// Creates the use case over an API gateway.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetches one proposal by id.
    ///
    /// # Errors
    /// Returns the gateway error; the caller folds it into the view's
    /// `FetchState`.
    pub async fn execute(
        &self,
        session: &Session,
        proposal_id: &str,
    ) -> Result<ProposalDetail, ApiError> {
        self.gateway.proposal(session, proposal_id).await
    }
}
