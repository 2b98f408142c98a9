//! # Prospect Infrastructure
//!
//! Adapters binding the application ports to the outside world: the
//! proposal-platform REST API over reqwest, the OAuth2/OIDC identity
//! authority, and environment-based configuration.

pub mod config;
pub mod gateway;
pub mod identity;

pub use config::{AppConfig, ConfigError, IdentityConfig};
pub use gateway::RestApiGateway;
pub use identity::OAuthIdentityClient;
