use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::info;
use updatemate_core::{AppError, AppResult};

use crate::auth_session::AuthSession;
use crate::dto::AccountResponse;
use crate::error::WebError;
use crate::state::AppState;

use super::fresh_credentials;

/// Lists the accounts the signed-in user can report on, or sends the browser
/// to `/login` when there is no usable login.
pub async fn index_handler(State(state): State<AppState>, auth_session: AuthSession) -> Response {
    match list_accounts(&state, &auth_session).await {
        Ok(accounts) => Json(accounts).into_response(),
        Err(AppError::Unauthorized(reason)) => {
            info!(reason = %reason, "no usable login, redirecting");
            Redirect::to("/login").into_response()
        }
        Err(error) => WebError(error).into_response(),
    }
}

async fn list_accounts(
    state: &AppState,
    auth_session: &AuthSession,
) -> AppResult<Vec<AccountResponse>> {
    let credentials = fresh_credentials(state, auth_session).await?;
    let accounts = state.account_service.list_accounts(&credentials).await?;

    Ok(accounts.into_iter().map(AccountResponse::from).collect())
}
