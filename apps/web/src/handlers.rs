pub mod accounts;
pub mod auth;
pub mod changes;
pub mod health;


use updatemate_core::{AppResult, Credentials};

use crate::auth_session::AuthSession;
use crate::state::AppState;

/// Loads the session credentials, renewing and re-storing them when the
/// access token is about to expire.
async fn fresh_credentials(state: &AppState, auth_session: &AuthSession) -> AppResult<Credentials> {
    let credentials = auth_session.require_credentials().await?;
    let fresh = state.auth_session_service.ensure_fresh(credentials).await?;

    if fresh.refreshed {
        auth_session.store_credentials(&fresh.credentials).await?;
    }

    Ok(fresh.credentials)
}
