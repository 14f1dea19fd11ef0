//! Typed view over the per-user session.
//!
//! The session holds the pending OAuth `state` between `/login` and
//! `/oauth2callback`, then the user's [`Credentials`] until logout or
//! inactivity expiry.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;
use tower_sessions::session;
use updatemate_core::{AppError, AppResult, Credentials};

const CREDENTIALS_KEY: &str = "updatemate.credentials";
const LOGIN_STATE_KEY: &str = "updatemate.login_state";

/// Session extractor exposing only the values the app stores.
pub struct AuthSession {
    session: Session,
}

impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = <Session as FromRequestParts<S>>::Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state)
            .await
            .map(|session| Self { session })
    }
}

impl AuthSession {
    /// Returns the stored credentials, if any.
    ///
    /// A stored bundle that no longer deserializes is treated as a broken
    /// login rather than a server fault.
    pub async fn credentials(&self) -> AppResult<Option<Credentials>> {
        match self.session.get::<Credentials>(CREDENTIALS_KEY).await {
            Ok(credentials) => Ok(credentials),
            Err(session::Error::SerdeJson(error)) => Err(AppError::Unauthorized(format!(
                "stored credentials are unreadable: {error}"
            ))),
            Err(error) => Err(AppError::Internal(format!(
                "failed to read session credentials: {error}"
            ))),
        }
    }

    pub async fn require_credentials(&self) -> AppResult<Credentials> {
        self.credentials()
            .await?
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))
    }

    pub async fn store_credentials(&self, credentials: &Credentials) -> AppResult<()> {
        self.session
            .insert(CREDENTIALS_KEY, credentials)
            .await
            .map_err(|error| AppError::Internal(format!("failed to store credentials: {error}")))
    }

    pub async fn remember_login_state(&self, state: &str) -> AppResult<()> {
        self.session
            .insert(LOGIN_STATE_KEY, state)
            .await
            .map_err(|error| AppError::Internal(format!("failed to store login state: {error}")))
    }

    /// Removes and returns the pending login state; it is single use.
    pub async fn take_login_state(&self) -> AppResult<Option<String>> {
        self.session
            .remove::<String>(LOGIN_STATE_KEY)
            .await
            .map_err(|error| AppError::Internal(format!("failed to read login state: {error}")))
    }

    /// Issues a new session id, keeping the stored values.
    pub async fn cycle_id(&self) -> AppResult<()> {
        self.session
            .cycle_id()
            .await
            .map_err(|error| AppError::Internal(format!("failed to rotate session id: {error}")))
    }

    pub async fn end(&self) -> AppResult<()> {
        self.session
            .delete()
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))
    }
}
