//! Updatemate web composition root.

#![forbid(unsafe_code)]

mod auth_session;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;
mod web_config;
mod web_router;
mod web_services;

use tracing::info;
use updatemate_core::AppError;

use crate::web_config::{WebConfig, init_tracing};
use crate::web_router::build_router;
use crate::web_services::{build_app_state, build_session_layer};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = WebConfig::load()?;
    let app_state = build_app_state(&config)?;
    let session_layer = build_session_layer(&config)?;
    let app = build_router(app_state, session_layer);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, public_origin = %config.public_origin(), "updatemate-web listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("web server error: {error}")))
}
