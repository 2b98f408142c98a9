//! OAuth2/OIDC identity provider adapter.

mod id_token;
mod oauth_client;

pub use oauth_client::OAuthIdentityClient;
