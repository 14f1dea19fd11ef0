use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// OAuth2 token bundle persisted in the authenticated session.
///
/// Deserialization maps every stored field explicitly and refuses bundles
/// that cannot renew themselves, so a broken session surfaces as
/// [`AppError::Unauthorized`] at the session boundary instead of deep inside
/// an API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredCredentials")]
pub struct Credentials {
    access_token: String,
    refresh_token: String,
    token_uri: String,
    client_id: String,
    scopes: Vec<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Creates a credential bundle, validating the renewal invariant.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        token_uri: impl Into<String>,
        client_id: impl Into<String>,
        scopes: Vec<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self, AppError> {
        StoredCredentials {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
            token_uri: Some(token_uri.into()),
            client_id: Some(client_id.into()),
            scopes,
            expires_at,
        }
        .try_into()
    }

    /// Returns the bearer token for platform calls.
    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }

    /// Returns the long-lived token used to mint new access tokens.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        self.refresh_token.as_str()
    }

    /// Returns the token endpoint these credentials were issued by.
    #[must_use]
    pub fn token_uri(&self) -> &str {
        self.token_uri.as_str()
    }

    /// Returns the OAuth client the credentials were issued to.
    #[must_use]
    pub fn client_id(&self) -> &str {
        self.client_id.as_str()
    }

    /// Returns the granted scopes.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Returns the access token expiry, if the provider reported one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns whether the access token is expired or expires within `leeway`.
    ///
    /// Bundles without a known expiry are treated as fresh.
    #[must_use]
    pub fn expires_within(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now + leeway)
    }

    /// Returns a copy carrying a renewed access token.
    ///
    /// The refresh token is replaced only when the provider rotated it.
    #[must_use]
    pub fn renewed(
        &self,
        access_token: impl Into<String>,
        rotated_refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: rotated_refresh_token
                .filter(|token| !token.trim().is_empty())
                .unwrap_or_else(|| self.refresh_token.clone()),
            token_uri: self.token_uri.clone(),
            client_id: self.client_id.clone(),
            scopes: self.scopes.clone(),
            expires_at,
        }
    }
}

#[derive(Deserialize)]
struct StoredCredentials {
    #[serde(default, alias = "token")]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_uri: Option<String>,
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    scopes: Vec<String>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl TryFrom<StoredCredentials> for Credentials {
    type Error = AppError;

    fn try_from(stored: StoredCredentials) -> Result<Self, Self::Error> {
        Ok(Self {
            access_token: required_field(stored.access_token, "access_token")?,
            refresh_token: required_field(stored.refresh_token, "refresh_token")?,
            token_uri: required_field(stored.token_uri, "token_uri")?,
            client_id: required_field(stored.client_id, "client_id")?,
            scopes: stored.scopes,
            expires_at: stored.expires_at,
        })
    }
}

fn required_field(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Unauthorized(format!("stored credentials are missing '{name}'")))
}
