//! REST API gateway implementation using reqwest.
//!
//! This adapter implements the `ApiGateway` port against the
//! proposal-platform backend. Every request carries a bearer token from the
//! token provider and an `x-request-id` header for correlation; every
//! non-success response is normalized into an `ApiError` whose display text
//! is the backend's `detail` field when one is present.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use prospect_application::{ApiError, ApiGateway, IdentityClient, TokenProvider};
use prospect_domain::{
    PlatformAnalytics, ProposalDetail, ProposalPage, Session, UserPage, UserProfile,
};

/// Request timeout for backend calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST gateway to the proposal-platform API.
///
/// This is the primary HTTP adapter for Prospect. It wraps `reqwest::Client`
/// and implements the `ApiGateway` port from the application layer.
pub struct RestApiGateway<C> {
    http: Client,
    base_url: Url,
    tokens: Arc<TokenProvider<C>>,
}

impl<C: IdentityClient> RestApiGateway<C> {
    /// Creates a gateway with default client settings.
    ///
    /// Default configuration:
    /// - Request timeout: 30 seconds
    /// - User-Agent: "Prospect/0.1.0"
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(base_url: Url, tokens: Arc<TokenProvider<C>>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("Prospect/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// Creates a gateway around a preconfigured reqwest client.
    #[must_use]
    pub const fn with_client(http: Client, base_url: Url, tokens: Arc<TokenProvider<C>>) -> Self {
        Self {
            http,
            base_url,
            tokens,
        }
    }

    /// Executes an authenticated GET and decodes the JSON response.
    ///
    /// Paths are relative to the configured base URL.
    async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
    ) -> Result<T, ApiError> {
        let token = self.tokens.get_token(session).await?;
        let url = self.base_url.join(path).map_err(|e| ApiError::Network {
            message: format!("invalid request url: {e}"),
        })?;

        let request_id = Uuid::now_v7();
        debug!(%request_id, path, "api request");

        let response = self
            .http
            .get(url)
            .header("Authorization", token.authorization_header())
            .header("Content-Type", "application/json")
            .header("x-request-id", request_id.to_string())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%request_id, status = status.as_u16(), "api request failed");
            return Err(normalize_error(status.as_u16(), &body));
        }

        response.json::<T>().await.map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl<C: IdentityClient> ApiGateway for RestApiGateway<C> {
    async fn user_profile(&self, session: &Session) -> Result<UserProfile, ApiError> {
        self.get_json(session, "api/user/profile").await
    }

    async fn proposals(&self, session: &Session) -> Result<ProposalPage, ApiError> {
        self.get_json(session, "api/proposals").await
    }

    async fn proposal(&self, session: &Session, id: &str) -> Result<ProposalDetail, ApiError> {
        self.get_json(session, &format!("api/proposals/{id}")).await
    }

    async fn admin_users(&self, session: &Session) -> Result<UserPage, ApiError> {
        self.get_json(session, "api/admin/users").await
    }

    async fn admin_analytics(&self, session: &Session) -> Result<PlatformAnalytics, ApiError> {
        self.get_json(session, "api/admin/analytics").await
    }
}

/// Maps reqwest transport errors to the gateway error type.
fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::Network {
            message: "request timed out".to_string(),
        };
    }
    ApiError::Network {
        message: error.to_string(),
    }
}

/// Normalizes a non-success response into a status error.
///
/// The detail text is taken from a `{"detail": ...}` body when parseable;
/// otherwise the HTTP status text stands in. The resulting error displays
/// the bare detail, so a 403 with `{"detail":"forbidden"}` reads as
/// "forbidden" rather than "HTTP 403".
fn normalize_error(status: u16, body: &str) -> ApiError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }

    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| match b.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .or_else(|| {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(String::from)
        })
        .unwrap_or_else(|| format!("HTTP {status}"));

    ApiError::Status { status, detail }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_forbidden_detail_displays_bare() {
        let err = normalize_error(403, r#"{"detail":"forbidden"}"#);
        assert_eq!(err.to_string(), "forbidden");
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_admin_gate_detail_passes_through() {
        let err = normalize_error(403, r#"{"detail":"Admin access required"}"#);
        assert_eq!(err.to_string(), "Admin access required");
    }

    #[test]
    fn test_unparseable_body_falls_back_to_status_text() {
        let err = normalize_error(404, "<html>not json</html>");
        assert_eq!(err.to_string(), "Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_unknown_status_without_detail() {
        let err = normalize_error(599, "");
        assert_eq!(err.to_string(), "HTTP 599");
    }

    #[test]
    fn test_structured_detail_is_stringified() {
        // FastAPI validation errors put an array in `detail`.
        let err = normalize_error(422, r#"{"detail":[{"msg":"field required"}]}"#);
        assert_eq!(err.to_string(), r#"[{"msg":"field required"}]"#);
    }
}
