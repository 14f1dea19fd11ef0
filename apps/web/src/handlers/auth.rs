use axum::extract::{Query, State};
use axum::response::Redirect;
use tracing::{info, warn};

use crate::auth_session::AuthSession;
use crate::dto::CallbackQuery;
use crate::error::WebResult;
use crate::state::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    auth_session: AuthSession,
) -> WebResult<Redirect> {
    let login = state.auth_session_service.begin_login();
    auth_session.remember_login_state(&login.state).await?;

    Ok(Redirect::to(&login.authorization_url))
}

pub async fn oauth2_callback_handler(
    State(state): State<AppState>,
    auth_session: AuthSession,
    Query(query): Query<CallbackQuery>,
) -> WebResult<Redirect> {
    let expected_state = auth_session.take_login_state().await?;
    let credentials = state
        .auth_session_service
        .complete_login(expected_state.as_deref(), query.into())
        .await
        .inspect_err(|error| warn!(error = %error, "oauth callback failed"))?;

    auth_session.cycle_id().await?;
    auth_session.store_credentials(&credentials).await?;
    info!(scopes = credentials.scopes().len(), "user signed in");

    Ok(Redirect::to("/"))
}

pub async fn logout_handler(auth_session: AuthSession) -> WebResult<Redirect> {
    auth_session.end().await?;

    Ok(Redirect::to("/"))
}
