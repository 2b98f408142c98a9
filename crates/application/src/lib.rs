//! Prospect Application - Session flow, authorization, and use cases
//!
//! This crate owns the client-side authenticated-session state machine, the
//! token provider, the role gate and route resolution, and the dashboard
//! use cases. External systems (the identity provider and the backend REST
//! API) are reached only through the ports defined here.

pub mod auth;
pub mod error;
pub mod fetch;
pub mod ports;
pub mod routing;
pub mod use_cases;

pub use auth::{SessionController, SessionState, TokenCache, TokenProvider};
pub use error::{ApplicationError, ApplicationResult};
pub use fetch::ScopedFetch;
pub use ports::{ApiError, ApiGateway, IdentityClient, InitializationError};
pub use routing::{
    Gate, RouteOutcome, View, authorize, home_route, post_login_route, resolve, resolve_path,
};
pub use use_cases::{
    AdminDashboardView, CustomerDashboardView, LoadAdminDashboard, LoadCustomerDashboard,
    ViewProposal,
};
