//! Prospect Domain - Core business types
//!
//! This crate defines the domain model for the Prospect dashboard client.
//! All types here are pure Rust with no I/O dependencies.

pub mod admin;
pub mod claims;
pub mod error;
pub mod fetch;
pub mod profile;
pub mod proposal;
pub mod route;
pub mod session;
pub mod token;

pub use admin::{DirectoryUser, PlatformAnalytics, UserPage};
pub use claims::{Claims, Role};
pub use error::{DomainError, DomainResult};
pub use fetch::FetchState;
pub use profile::UserProfile;
pub use proposal::{
    Proposal, ProposalDetail, ProposalPage, ProposalSection, ProposalStats, ProposalStatus,
    TeamMember,
};
pub use route::Route;
pub use session::{Account, AccountId, Session};
pub use token::{AccessToken, AuthError};
