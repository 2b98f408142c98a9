//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer.

mod api_gateway;
mod identity_client;

pub use api_gateway::{ApiError, ApiGateway};
pub use identity_client::{IdentityClient, InitializationError};
