use tower_sessions::cookie::time::Duration;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use updatemate_core::AppError;

use crate::web_config::WebConfig;

/// Session layer keeping credentials server-side behind a signed id cookie.
pub type WebSessionLayer = SessionManagerLayer<MemoryStore, SignedCookie>;

pub fn build_session_layer(config: &WebConfig) -> Result<WebSessionLayer, AppError> {
    memory_session_layer(&config.session_secret, config.cookie_secure)
}

pub(crate) fn memory_session_layer(
    session_secret: &str,
    cookie_secure: bool,
) -> Result<WebSessionLayer, AppError> {
    let key = Key::try_from(session_secret.as_bytes()).map_err(|error| {
        AppError::Validation(format!("SESSION_SECRET cannot sign cookies: {error}"))
    })?;

    Ok(SessionManagerLayer::new(MemoryStore::default())
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)))
        .with_signed(key))
}
