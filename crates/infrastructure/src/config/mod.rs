//! Environment-based application configuration.
//!
//! Configuration is read once at startup from `PROSPECT_*` environment
//! variables; there is no hot reload.

use thiserror::Error;
use url::Url;

/// Environment name treated as production (no badge shown).
const PRODUCTION_ENV: &str = "production";

/// Default backend API base URL.
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default redirect target after sign-in and sign-out.
const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000";

/// Configuration errors raised at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable: {name}")]
    Missing {
        /// Variable name.
        name: &'static str,
    },

    /// An environment variable is set but cannot be parsed.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Parse error description.
        message: String,
    },
}

/// Identity-provider settings for the OAuth2/OIDC client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Application (client) id from the app registration.
    pub client_id: String,
    /// Directory (tenant) id.
    pub tenant_id: String,
    /// Authority base URL; discovery is fetched beneath it.
    pub authority: Url,
    /// Redirect URI registered for the client.
    pub redirect_uri: Url,
    /// Where the authority sends the user after sign-out.
    pub post_logout_redirect_uri: Url,
    /// Scopes requested for backend access tokens.
    pub scopes: Vec<String>,
}

/// Full application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the proposal-platform API.
    pub api_base_url: Url,
    /// Deployment environment name, e.g. "development" or "production".
    pub environment_name: String,
    /// Identity-provider settings.
    pub identity: IdentityConfig,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when `PROSPECT_CLIENT_ID` or
    /// `PROSPECT_TENANT_ID` is unset, or when a URL variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Gateway paths are joined onto this URL, and `Url::join` drops the
        // last path segment of a base without a trailing slash.
        let api_base_url = ensure_trailing_slash(parse_url(
            "PROSPECT_API_URL",
            &lookup("PROSPECT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?);

        let client_id = require(&lookup, "PROSPECT_CLIENT_ID")?;
        let tenant_id = require(&lookup, "PROSPECT_TENANT_ID")?;

        let authority = match lookup("PROSPECT_AUTHORITY") {
            Some(value) => parse_url("PROSPECT_AUTHORITY", &value)?,
            None => parse_url(
                "PROSPECT_AUTHORITY",
                &format!("https://login.microsoftonline.com/{tenant_id}"),
            )?,
        };

        let redirect_uri = parse_url(
            "PROSPECT_REDIRECT_URI",
            &lookup("PROSPECT_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
        )?;
        let post_logout_redirect_uri = parse_url(
            "PROSPECT_POST_LOGOUT_REDIRECT_URI",
            &lookup("PROSPECT_POST_LOGOUT_REDIRECT_URI")
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
        )?;

        let scopes = lookup("PROSPECT_SCOPES")
            .map(|s| s.split_whitespace().map(String::from).collect())
            .unwrap_or_else(|| vec![format!("api://{client_id}/.default")]);

        let environment_name =
            lookup("PROSPECT_ENV_NAME").unwrap_or_else(|| "development".to_string());

        Ok(Self {
            api_base_url,
            environment_name,
            identity: IdentityConfig {
                client_id,
                tenant_id,
                authority,
                redirect_uri,
                post_logout_redirect_uri,
                scopes,
            },
        })
    }

    /// Badge label for non-production environments.
    ///
    /// Production shows no badge.
    #[must_use]
    pub fn environment_badge(&self) -> Option<&str> {
        (self.environment_name != PRODUCTION_ENV).then_some(self.environment_name.as_str())
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing { name })
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::Invalid {
        name,
        message: e.to_string(),
    })
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
