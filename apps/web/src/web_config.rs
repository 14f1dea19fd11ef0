use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use tracing_subscriber::EnvFilter;
use updatemate_core::AppError;
use updatemate_domain::AccountId;
use updatemate_infrastructure::{
    DEFAULT_CHANGE_EVENT_LIMIT, GOOGLE_ADS_API_VERSION, GOOGLE_ADS_BASE_URL, GOOGLE_AUTH_URL,
    GOOGLE_TOKEN_URL,
};
use url::Url;

/// Minimum key material accepted for signing session cookies.
const SESSION_SECRET_MIN_BYTES: usize = 64;

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub google_client_id: String,
    pub google_client_secret: String,
    pub developer_token: String,
    pub login_customer_id: Option<AccountId>,
    pub ads_base_url: Url,
    pub ads_api_version: String,
    pub change_event_limit: u32,
    pub oauth_redirect_uri: Url,
    pub oauth_auth_url: Url,
    pub oauth_token_url: Url,
    pub session_secret: String,
    pub cookie_secure: bool,
    pub web_host: String,
    pub web_port: u16,
}

impl WebConfig {
    pub fn load() -> Result<Self, AppError> {
        let google_client_id = required_non_empty_env("GOOGLE_CLIENT_ID")?;
        let google_client_secret = required_non_empty_env("GOOGLE_CLIENT_SECRET")?;
        let developer_token = required_non_empty_env("GOOGLE_ADS_DEVELOPER_TOKEN")?;

        let login_customer_id = env::var("GOOGLE_ADS_LOGIN_CUSTOMER_ID")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| {
                AccountId::new(value).map_err(|error| {
                    AppError::Validation(format!("invalid GOOGLE_ADS_LOGIN_CUSTOMER_ID: {error}"))
                })
            })
            .transpose()?;

        let ads_base_url = url_env("GOOGLE_ADS_API_BASE_URL", Some(GOOGLE_ADS_BASE_URL))?;
        let ads_api_version = env::var("GOOGLE_ADS_API_VERSION")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| GOOGLE_ADS_API_VERSION.to_owned());
        let change_event_limit = match env::var("CHANGE_EVENT_LIMIT") {
            Ok(value) if !value.trim().is_empty() => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "CHANGE_EVENT_LIMIT must be a positive integer, got '{value}'"
                    ))
                })?,
            _ => DEFAULT_CHANGE_EVENT_LIMIT,
        };

        let oauth_redirect_uri = url_env("OAUTH_REDIRECT_URI", None)?;
        let oauth_auth_url = url_env("OAUTH_AUTH_URL", Some(GOOGLE_AUTH_URL))?;
        let oauth_token_url = url_env("OAUTH_TOKEN_URL", Some(GOOGLE_TOKEN_URL))?;

        let session_secret = required_env("SESSION_SECRET")?;
        if session_secret.len() < SESSION_SECRET_MIN_BYTES {
            return Err(AppError::Validation(format!(
                "SESSION_SECRET must be at least {SESSION_SECRET_MIN_BYTES} bytes"
            )));
        }

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let web_host = env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
        let web_port = env::var("WEB_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        Ok(Self {
            google_client_id,
            google_client_secret,
            developer_token,
            login_customer_id,
            ads_base_url,
            ads_api_version,
            change_event_limit,
            oauth_redirect_uri,
            oauth_auth_url,
            oauth_token_url,
            session_secret,
            cookie_secure,
            web_host,
            web_port,
        })
    }

    /// Origin the browser sees, taken from the registered callback URI.
    pub fn public_origin(&self) -> String {
        self.oauth_redirect_uri.origin().ascii_serialization()
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.web_host).map_err(|error| {
            AppError::Internal(format!("invalid WEB_HOST '{}': {error}", self.web_host))
        })?;
        Ok(SocketAddr::from((host, self.web_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn url_env(name: &str, default: Option<&str>) -> Result<Url, AppError> {
    let value = match (env::var(name).ok().filter(|value| !value.trim().is_empty()), default) {
        (Some(value), _) => value,
        (None, Some(default)) => default.to_owned(),
        (None, None) => return Err(AppError::Validation(format!("{name} is required"))),
    };

    Url::parse(value.trim())
        .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}")))
}
