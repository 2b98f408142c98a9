//! OAuth2/OIDC identity client implementation.
//!
//! Talks to a Microsoft-identity-platform shaped authority. Silent
//! acquisition uses the refresh-token grant; interactive acquisition and
//! login use the device-authorization grant, polling the token endpoint
//! until the user completes sign-in in a browser.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::RwLock;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use prospect_application::{IdentityClient, InitializationError};
use prospect_domain::{AccessToken, Account, AccountId, AuthError};

use crate::config::IdentityConfig;

use super::id_token::{account_from_claims, decode_claims};

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Device-authorization grant type (RFC 8628).
const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Poll interval used when the authority does not suggest one.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Extra delay added on a `slow_down` response.
const SLOW_DOWN_BACKOFF_SECS: u64 = 5;

/// Scopes every login request carries so the grant yields an identity
/// token and a refresh token.
const LOGIN_SCOPES: [&str; 3] = ["openid", "profile", "offline_access"];

/// OIDC discovery document, reduced to the endpoints the client uses.
#[derive(Debug, Deserialize)]
struct DiscoveryDocument {
    token_endpoint: Url,
    #[serde(default)]
    device_authorization_endpoint: Option<Url>,
    #[serde(default)]
    end_session_endpoint: Option<Url>,
}

/// Resolved authority endpoints.
#[derive(Debug, Clone)]
struct Endpoints {
    token: Url,
    device_authorization: Url,
    end_session: Option<Url>,
}

/// Token response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

/// Error response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Device-authorization response (RFC 8628 §3.2).
#[derive(Debug, Deserialize)]
struct DeviceAuthorizationResponse {
    device_code: String,
    user_code: String,
    verification_uri: String,
    expires_in: u64,
    #[serde(default)]
    interval: Option<u64>,
}

/// Outcome of one token-endpoint request.
enum TokenGrant {
    Issued(Box<TokenResponse>),
    Denied {
        error: String,
        description: Option<String>,
    },
}

/// Identity client backed by an OAuth2/OIDC authority.
pub struct OAuthIdentityClient {
    config: IdentityConfig,
    http: Client,
    endpoints: RwLock<Option<Endpoints>>,
    accounts: RwLock<Vec<Account>>,
    refresh_tokens: RwLock<HashMap<AccountId, String>>,
}

impl OAuthIdentityClient {
    /// Creates a client for the configured authority.
    ///
    /// Endpoints are resolved later by [`initialize`](IdentityClient::initialize).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: IdentityConfig) -> Result<Arc<Self>, InitializationError> {
        let http = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| InitializationError::new(e.to_string()))?;

        Ok(Arc::new(Self {
            config,
            http,
            endpoints: RwLock::new(None),
            accounts: RwLock::new(Vec::new()),
            refresh_tokens: RwLock::new(HashMap::new()),
        }))
    }

    async fn endpoints(&self) -> Result<Endpoints, String> {
        self.endpoints
            .read()
            .await
            .clone()
            .ok_or_else(|| "identity client is not initialized".to_string())
    }

    /// Executes one token-endpoint request.
    ///
    /// A denial (non-success with a structured OAuth error body) is a normal
    /// outcome here; only transport and parse failures are errors.
    async fn post_token(&self, endpoint: Url, params: &[(&str, &str)]) -> Result<TokenGrant, String> {
        let body = serde_urlencoded::to_string(params)
            .map_err(|e| format!("failed to encode form: {e}"))?;

        let response = self
            .http
            .post(endpoint)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            return response
                .json::<TokenResponse>()
                .await
                .map(|t| TokenGrant::Issued(Box::new(t)))
                .map_err(|e| format!("failed to parse token response: {e}"));
        }

        let text = response.text().await.unwrap_or_default();
        serde_json::from_str::<TokenErrorResponse>(&text).map_or_else(
            |_| Err(format!("token request failed: {text}")),
            |err| {
                Ok(TokenGrant::Denied {
                    error: err.error,
                    description: err.error_description,
                })
            },
        )
    }

    /// Redeems the stored refresh token for the account.
    async fn refresh_grant(
        &self,
        scopes: &[String],
        account: &Account,
    ) -> Result<TokenResponse, AuthError> {
        let silent_err = |message: String| AuthError::SilentAcquisitionFailed { message };

        let endpoints = self.endpoints().await.map_err(silent_err)?;
        let refresh_token = self
            .refresh_tokens
            .read()
            .await
            .get(&account.id)
            .cloned()
            .ok_or_else(|| silent_err("no refresh token for account".to_string()))?;

        let scope = scopes.join(" ");
        let grant = self
            .post_token(
                endpoints.token,
                &[
                    ("grant_type", "refresh_token"),
                    ("client_id", &self.config.client_id),
                    ("refresh_token", &refresh_token),
                    ("scope", &scope),
                ],
            )
            .await
            .map_err(silent_err)?;

        match grant {
            TokenGrant::Issued(token) => {
                self.remember_refresh_token(&account.id, token.refresh_token.as_deref())
                    .await;
                Ok(*token)
            }
            TokenGrant::Denied { error, description } => {
                Err(silent_err(description.unwrap_or(error)))
            }
        }
    }

    /// Runs the device-authorization grant to completion.
    async fn device_grant(&self, scopes: &[String]) -> Result<TokenResponse, String> {
        let endpoints = self.endpoints().await?;
        let scope = scopes.join(" ");

        let body = serde_urlencoded::to_string([
            ("client_id", self.config.client_id.as_str()),
            ("scope", scope.as_str()),
        ])
        .map_err(|e| format!("failed to encode form: {e}"))?;

        let response = self
            .http
            .post(endpoints.device_authorization)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("device authorization request failed: {text}"));
        }

        let authorization: DeviceAuthorizationResponse = response
            .json()
            .await
            .map_err(|e| format!("failed to parse device authorization: {e}"))?;

        info!(
            user_code = %authorization.user_code,
            verification_uri = %authorization.verification_uri,
            "complete sign-in in a browser"
        );

        let deadline = Instant::now() + Duration::from_secs(authorization.expires_in);
        let mut interval = authorization.interval.unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        loop {
            if Instant::now() >= deadline {
                return Err("device code expired before sign-in completed".to_string());
            }
            sleep(Duration::from_secs(interval)).await;

            let grant = self
                .post_token(
                    endpoints.token.clone(),
                    &[
                        ("grant_type", DEVICE_GRANT_TYPE),
                        ("client_id", &self.config.client_id),
                        ("device_code", &authorization.device_code),
                    ],
                )
                .await?;

            match grant {
                TokenGrant::Issued(token) => return Ok(*token),
                TokenGrant::Denied { error, description } => {
                    match next_poll_interval(&error, interval) {
                        Some(next) => {
                            debug!(error, next_interval_secs = next, "device grant pending");
                            interval = next;
                        }
                        None => return Err(description.unwrap_or(error)),
                    }
                }
            }
        }
    }

    async fn remember_refresh_token(&self, account: &AccountId, refresh_token: Option<&str>) {
        if let Some(token) = refresh_token {
            self.refresh_tokens
                .write()
                .await
                .insert(account.clone(), token.to_string());
        }
    }

    async fn remember_account(&self, account: Account) {
        let mut accounts = self.accounts.write().await;
        upsert_front(&mut accounts, account);
    }
}

#[async_trait]
impl IdentityClient for OAuthIdentityClient {
    async fn initialize(&self) -> Result<(), InitializationError> {
        let discovery_url = format!(
            "{}/.well-known/openid-configuration",
            self.config.authority.as_str().trim_end_matches('/')
        );

        let response = self
            .http
            .get(&discovery_url)
            .send()
            .await
            .map_err(|e| InitializationError::new(format!("discovery request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(InitializationError::new(format!(
                "discovery request failed with HTTP {}",
                response.status().as_u16()
            )));
        }

        let document: DiscoveryDocument = response.json().await.map_err(|e| {
            InitializationError::new(format!("discovery document is not valid JSON: {e}"))
        })?;

        let device_authorization = document.device_authorization_endpoint.ok_or_else(|| {
            InitializationError::new(
                "authority does not advertise a device_authorization_endpoint",
            )
        })?;

        info!(token_endpoint = %document.token_endpoint, "identity endpoints resolved");

        *self.endpoints.write().await = Some(Endpoints {
            token: document.token_endpoint,
            device_authorization,
            end_session: document.end_session_endpoint,
        });

        Ok(())
    }

    async fn acquire_token_silent(
        &self,
        scopes: &[String],
        account: &Account,
    ) -> Result<AccessToken, AuthError> {
        let response = self.refresh_grant(scopes, account).await?;
        Ok(access_token(response))
    }

    async fn acquire_token_interactive(
        &self,
        scopes: &[String],
    ) -> Result<AccessToken, AuthError> {
        let response = self.device_grant(scopes).await.map_err(|message| {
            AuthError::InteractiveAcquisitionFailed { message }
        })?;
        Ok(access_token(response))
    }

    async fn login_interactive(&self, scopes: &[String]) -> Result<Account, AuthError> {
        let login_failed = |message: String| AuthError::LoginFailed { message };

        let response = self
            .device_grant(&with_login_scopes(scopes))
            .await
            .map_err(login_failed)?;

        let id_token = response
            .id_token
            .as_deref()
            .ok_or_else(|| login_failed("token response carried no identity token".to_string()))?;

        let account = account_from_claims(decode_claims(id_token)?)?;

        self.remember_refresh_token(&account.id, response.refresh_token.as_deref())
            .await;
        self.remember_account(account.clone()).await;

        info!(account = %account.id, username = %account.username, "signed in");
        Ok(account)
    }

    async fn logout_interactive(&self) -> Result<(), AuthError> {
        self.accounts.write().await.clear();
        self.refresh_tokens.write().await.clear();

        match self.endpoints().await {
            Ok(Endpoints {
                end_session: Some(mut url),
                ..
            }) => {
                url.query_pairs_mut().append_pair(
                    "post_logout_redirect_uri",
                    self.config.post_logout_redirect_uri.as_str(),
                );
                info!(end_session = %url, "sign-out redirect");
            }
            _ => warn!("no end-session endpoint known, local sign-out only"),
        }

        Ok(())
    }

    async fn cached_accounts(&self) -> Vec<Account> {
        self.accounts.read().await.clone()
    }
}

/// Converts a token response into the domain access token.
fn access_token(response: TokenResponse) -> AccessToken {
    let scopes = response
        .scope
        .map(|s| s.split_whitespace().map(String::from).collect())
        .unwrap_or_default();
    AccessToken::new(
        response.access_token,
        response.token_type,
        response.expires_in,
        scopes,
    )
}

/// Next device-grant poll interval, or `None` when the denial is fatal.
fn next_poll_interval(error: &str, current_secs: u64) -> Option<u64> {
    match error {
        "authorization_pending" => Some(current_secs),
        "slow_down" => Some(current_secs + SLOW_DOWN_BACKOFF_SECS),
        _ => None,
    }
}

/// Login requests always carry the OIDC scopes on top of the caller's.
fn with_login_scopes(scopes: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = LOGIN_SCOPES.iter().map(ToString::to_string).collect();
    for scope in scopes {
        if !merged.iter().any(|s| s == scope) {
            merged.push(scope.clone());
        }
    }
    merged
}

/// Moves the account to the front of the list, replacing any previous entry
/// with the same id. The front account is the one session restore adopts.
fn upsert_front(accounts: &mut Vec<Account>, account: Account) {
    accounts.retain(|a| a.id != account.id);
    accounts.insert(0, account);
}
