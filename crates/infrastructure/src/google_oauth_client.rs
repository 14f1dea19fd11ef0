//! Google OAuth2 adapter for the identity provider port.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use updatemate_application::IdentityProvider;
use updatemate_core::{AppError, AppResult, Credentials};
use url::Url;


/// Google authorization endpoint.
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
/// Google token endpoint.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
/// Scope granting access to the Google Ads API.
pub const ADWORDS_SCOPE: &str = "https://www.googleapis.com/auth/adwords";

/// OAuth2 web-client registration.
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    /// Registered client identifier.
    pub client_id: String,
    /// Registered client secret. Never leaves the server.
    pub client_secret: String,
    /// Callback URI registered for the client.
    pub redirect_uri: Url,
    /// Authorization endpoint.
    pub auth_url: Url,
    /// Token endpoint.
    pub token_url: Url,
    /// Requested scopes.
    pub scopes: Vec<String>,
}

/// Authorization-code and refresh-token client for Google OAuth2.
pub struct GoogleOAuthClient {
    http_client: reqwest::Client,
    config: GoogleOAuthConfig,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl GoogleOAuthClient {
    /// Creates a client for one registered OAuth application.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: GoogleOAuthConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    async fn request_token(
        &self,
        token_url: Url,
        form: &[(&str, &str)],
        operation: &'static str,
    ) -> AppResult<TokenResponse> {
        let response = self
            .http_client
            .post(token_url)
            .form(form)
            .send()
            .await
            .map_err(|error| {
                AppError::Transport(format!("identity provider {operation} failed: {error}"))
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<TokenResponse>().await.map_err(|error| {
                AppError::Internal(format!(
                    "identity provider {operation} returned an unreadable body: {error}"
                ))
            });
        }

        let body = response.text().await.map_err(|error| {
            AppError::Transport(format!(
                "identity provider {operation} response could not be read: {error}"
            ))
        })?;
        let failure = serde_json::from_str::<TokenErrorResponse>(&body).unwrap_or_default();
        let reason = match (failure.error, failure.error_description) {
            (Some(error), Some(description)) => format!("{error}: {description}"),
            (Some(error), None) => error,
            _ => format!("HTTP {status}"),
        };

        if status.is_server_error() {
            return Err(AppError::Transport(format!(
                "identity provider {operation} failed: {reason}"
            )));
        }

        Err(AppError::Unauthorized(format!(
            "identity provider refused {operation}: {reason}"
        )))
    }

    fn granted_scopes(&self, scope: Option<String>) -> Vec<String> {
        scope
            .map(|scope| scope.split_whitespace().map(ToOwned::to_owned).collect())
            .unwrap_or_else(|| self.config.scopes.clone())
    }
}

fn expiry_from(expires_in: Option<i64>) -> Option<DateTime<Utc>> {
    expires_in
        .and_then(TimeDelta::try_seconds)
        .map(|lifetime| Utc::now() + lifetime)
}

#[async_trait]
impl IdentityProvider for GoogleOAuthClient {
    fn authorization_url(&self, state: &str) -> String {
        let scope = self.config.scopes.join(" ");
        let mut url = self.config.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", self.config.redirect_uri.as_str())
            .append_pair("scope", &scope)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("state", state);

        url.into()
    }

    async fn exchange_code(&self, code: &str) -> AppResult<Credentials> {
        let token = self
            .request_token(
                self.config.token_url.clone(),
                &[
                    ("grant_type", "authorization_code"),
                    ("code", code),
                    ("redirect_uri", self.config.redirect_uri.as_str()),
                    ("client_id", self.config.client_id.as_str()),
                    ("client_secret", self.config.client_secret.as_str()),
                ],
                "code exchange",
            )
            .await?;

        let refresh_token = token
            .refresh_token
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                AppError::Unauthorized(
                    "identity provider did not return a refresh token".to_owned(),
                )
            })?;

        let scopes = self.granted_scopes(token.scope);
        info!(scopes = scopes.len(), "oauth code exchange completed");

        Credentials::new(
            token.access_token,
            refresh_token,
            self.config.token_url.as_str(),
            self.config.client_id.as_str(),
            scopes,
            expiry_from(token.expires_in),
        )
    }

    async fn refresh(&self, credentials: &Credentials) -> AppResult<Credentials> {
        if credentials.client_id() != self.config.client_id {
            return Err(AppError::Unauthorized(
                "credentials were issued to a different OAuth client".to_owned(),
            ));
        }

        let token_url = Url::parse(credentials.token_uri()).map_err(|error| {
            AppError::Unauthorized(format!("stored token endpoint is invalid: {error}"))
        })?;

        let token = self
            .request_token(
                token_url,
                &[
                    ("grant_type", "refresh_token"),
                    ("refresh_token", credentials.refresh_token()),
                    ("client_id", self.config.client_id.as_str()),
                    ("client_secret", self.config.client_secret.as_str()),
                ],
                "token refresh",
            )
            .await
            .inspect_err(|error| warn!(error = %error, "oauth token refresh failed"))?;

        info!("oauth access token renewed");

        Ok(credentials.renewed(
            token.access_token,
            token.refresh_token,
            expiry_from(token.expires_in),
        ))
    }
}
