use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::web_services::WebSessionLayer;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, session_layer: WebSessionLayer) -> Router {
    Router::new()
        .route("/", get(handlers::accounts::index_handler))
        .route("/login", get(handlers::auth::login_handler))
        .route(
            "/oauth2callback",
            get(handlers::auth::oauth2_callback_handler),
        )
        .route(
            "/fetch_changes",
            post(handlers::changes::fetch_changes_handler),
        )
        .route(
            "/logout",
            get(handlers::auth::logout_handler).post(handlers::auth::logout_handler),
        )
        .route("/health", get(handlers::health::health_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(session_layer)
        .with_state(app_state)
}
