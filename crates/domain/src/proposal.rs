//! Proposal projections returned by the backend.
//!
//! The client is a read/display surface: these types are deserialized from
//! the REST API and never mutated locally.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Being drafted.
    Draft,
    /// Under internal review.
    InReview,
    /// Submitted to the agency.
    Submitted,
}

impl ProposalStatus {
    /// Human-readable label for badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InReview => "In Review",
            Self::Submitted => "Submitted",
        }
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A proposal as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Backend identifier, e.g. "prop-001".
    pub id: String,
    /// Proposal title.
    pub title: String,
    /// Soliciting agency.
    pub agency: String,
    /// Monetary value as a display string, e.g. "$2.5M".
    pub value: String,
    /// Lifecycle status.
    pub status: ProposalStatus,
    /// Submission due date.
    pub due_date: NaiveDate,
    /// Raw completion percentage as reported by the backend.
    pub completion: u8,
}

impl Proposal {
    /// Completion percentage clamped to 0..=100.
    #[must_use]
    pub fn completion_percent(&self) -> u8 {
        self.completion.min(100)
    }
}

/// A proposal section with authoring progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSection {
    /// Section name, e.g. "Technical Approach".
    pub name: String,
    /// Authoring status as reported by the backend.
    pub status: String,
    /// Current word count.
    pub word_count: u32,
}

/// A member of the proposal team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Member name.
    pub name: String,
    /// Member role on the proposal, e.g. "Technical Lead".
    pub role: String,
}

/// Full detail view of a single proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDetail {
    /// The summary fields shared with the list view.
    #[serde(flatten)]
    pub summary: Proposal,
    /// Contract type, e.g. "Firm Fixed Price".
    pub contract_type: String,
    /// Authoring sections.
    pub sections: Vec<ProposalSection>,
    /// Proposal team.
    pub team: Vec<TeamMember>,
    /// Display name of the creator.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /api/proposals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalPage {
    /// Proposals visible to the caller.
    pub proposals: Vec<Proposal>,
    /// Total count reported by the backend.
    pub total: u64,
    /// Role string the backend resolved for the caller.
    #[serde(default)]
    pub user_role: Option<String>,
}

/// Aggregate statistics derived from a proposal page for the stats grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProposalStats {
    /// Total proposal count (as reported by the backend).
    pub total: u64,
    /// Number of drafts in the page.
    pub draft: usize,
    /// Number under review in the page.
    pub in_review: usize,
    /// Number submitted in the page.
    pub submitted: usize,
    /// Mean completion over the page, rounded; 0 for an empty page.
    pub avg_completion: u8,
}

impl ProposalStats {
    /// Derives statistics from a proposal page.
    #[must_use]
    pub fn from_page(page: &ProposalPage) -> Self {
        let mut stats = Self {
            total: page.total,
            ..Self::default()
        };

        let mut completion_sum: u32 = 0;
        for proposal in &page.proposals {
            match proposal.status {
                ProposalStatus::Draft => stats.draft += 1,
                ProposalStatus::InReview => stats.in_review += 1,
                ProposalStatus::Submitted => stats.submitted += 1,
            }
            completion_sum += u32::from(proposal.completion_percent());
        }

        let count = page.proposals.len() as u32;
        if count > 0 {
            // Rounded integer mean; values are clamped to 100 so this fits u8.
            #[allow(clippy::cast_possible_truncation)]
            {
                stats.avg_completion = ((completion_sum + count / 2) / count) as u8;
            }
        }
        stats
    }
}
