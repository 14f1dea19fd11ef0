use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use updatemate_core::{AppResult, Credentials};

/// OAuth2 identity provider port.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Builds the consent-prompting authorization URL carrying `state`.
    fn authorization_url(&self, state: &str) -> String;

    /// Exchanges an authorization code for a credential bundle.
    async fn exchange_code(&self, code: &str) -> AppResult<Credentials>;

    /// Mints a new access token from the bundle's refresh token.
    async fn refresh(&self, credentials: &Credentials) -> AppResult<Credentials>;
}

/// Time source.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
