//! OAuth2 login handshake and credential renewal.
//!
//! The service is stateless: the caller keeps the pending `state` value and
//! the resulting [`Credentials`] in its own session and hands them back on
//! each call.

use std::sync::Arc;

use chrono::Duration;
use updatemate_core::{AppError, AppResult, Credentials};

use crate::identity_ports::{Clock, IdentityProvider};


/// Access tokens expiring within this window are renewed before use.
const RENEWAL_LEEWAY_SECONDS: i64 = 60;

/// Authorization redirect plus the state value the callback must echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Provider URL the browser is sent to.
    pub authorization_url: String,
    /// Anti-forgery value to keep until the callback arrives.
    pub state: String,
}

/// Query parameters the provider appends to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationCallback {
    /// Authorization code on success.
    pub code: Option<String>,
    /// Echoed state value.
    pub state: Option<String>,
    /// Provider error code on failure.
    pub error: Option<String>,
    /// Provider error description on failure.
    pub error_description: Option<String>,
}

/// Credentials checked for expiry, possibly renewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshCredentials {
    /// Usable credentials.
    pub credentials: Credentials,
    /// Whether a new access token was minted and must be stored.
    pub refreshed: bool,
}

/// Application service for the OAuth2 login flow.
#[derive(Clone)]
pub struct AuthSessionService {
    provider: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
}

impl AuthSessionService {
    /// Creates a service from an identity provider and a clock.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { provider, clock }
    }

    /// Starts a login with a fresh anti-forgery state.
    #[must_use]
    pub fn begin_login(&self) -> LoginRequest {
        let state = uuid::Uuid::new_v4().simple().to_string();

        LoginRequest {
            authorization_url: self.provider.authorization_url(&state),
            state,
        }
    }

    /// Validates the provider callback and exchanges its code for credentials.
    pub async fn complete_login(
        &self,
        expected_state: Option<&str>,
        callback: AuthorizationCallback,
    ) -> AppResult<Credentials> {
        if let Some(error) = callback.error {
            let description = callback
                .error_description
                .unwrap_or_else(|| "no description".to_owned());
            return Err(AppError::Unauthorized(format!(
                "identity provider returned '{error}': {description}"
            )));
        }

        let expected_state = expected_state.ok_or_else(|| {
            AppError::Unauthorized("no login is pending for this session".to_owned())
        })?;
        if callback.state.as_deref() != Some(expected_state) {
            return Err(AppError::Unauthorized(
                "authorization state does not match the pending login".to_owned(),
            ));
        }

        let code = callback
            .code
            .filter(|code| !code.trim().is_empty())
            .ok_or_else(|| {
                AppError::Unauthorized("authorization response is missing the code".to_owned())
            })?;

        self.provider.exchange_code(&code).await
    }

    /// Renews the access token when it is expired or about to expire.
    pub async fn ensure_fresh(&self, credentials: Credentials) -> AppResult<FreshCredentials> {
        if !credentials.expires_within(
            self.clock.now(),
            Duration::seconds(RENEWAL_LEEWAY_SECONDS),
        ) {
            return Ok(FreshCredentials {
                credentials,
                refreshed: false,
            });
        }

        let renewed = self.provider.refresh(&credentials).await?;

        Ok(FreshCredentials {
            credentials: renewed,
            refreshed: true,
        })
    }
}
