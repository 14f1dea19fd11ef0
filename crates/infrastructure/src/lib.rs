//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod google_ads_client;
mod google_oauth_client;

pub use google_ads_client::{
    DEFAULT_CHANGE_EVENT_LIMIT, GOOGLE_ADS_API_VERSION, GOOGLE_ADS_BASE_URL, GoogleAdsClient,
    GoogleAdsConfig,
};
pub use google_oauth_client::{
    ADWORDS_SCOPE, GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL, GoogleOAuthClient, GoogleOAuthConfig,
};
