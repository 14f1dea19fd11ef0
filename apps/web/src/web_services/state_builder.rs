use std::sync::Arc;

use updatemate_application::{
    AccountService, AuthSessionService, ChangeHistoryService, Clock, SystemClock,
};
use updatemate_core::AppError;
use updatemate_infrastructure::{
    ADWORDS_SCOPE, GoogleAdsClient, GoogleAdsConfig, GoogleOAuthClient, GoogleOAuthConfig,
};

use crate::state::AppState;
use crate::web_config::WebConfig;

pub fn build_app_state(config: &WebConfig) -> Result<AppState, AppError> {
    let http_client = reqwest::Client::builder()
        .user_agent(concat!("updatemate/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let ads_client = Arc::new(GoogleAdsClient::new(
        http_client.clone(),
        GoogleAdsConfig {
            base_url: config.ads_base_url.clone(),
            api_version: config.ads_api_version.clone(),
            developer_token: config.developer_token.clone(),
            login_customer_id: config.login_customer_id.clone(),
            change_event_limit: config.change_event_limit,
        },
    ));

    let oauth_client = Arc::new(GoogleOAuthClient::new(
        http_client,
        GoogleOAuthConfig {
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.oauth_redirect_uri.clone(),
            auth_url: config.oauth_auth_url.clone(),
            token_url: config.oauth_token_url.clone(),
            scopes: vec![ADWORDS_SCOPE.to_owned()],
        },
    ));

    Ok(AppState {
        account_service: AccountService::new(ads_client.clone()),
        change_history_service: ChangeHistoryService::new(ads_client, clock.clone()),
        auth_session_service: AuthSessionService::new(oauth_client, clock),
        public_origin: config.public_origin(),
    })
}
