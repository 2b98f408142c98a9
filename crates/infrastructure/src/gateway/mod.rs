//! Backend API gateway adapters.

mod rest_client;

pub use rest_client::RestApiGateway;
