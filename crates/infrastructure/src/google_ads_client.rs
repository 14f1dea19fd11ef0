//! Google Ads REST adapter for the account directory and change-log ports.

use async_trait::async_trait;
use tracing::debug;
use updatemate_application::{AccountDirectory, ChangeEventQuery, ChangeLogSource};
use updatemate_core::{AppError, AppResult, Credentials};
use updatemate_domain::{AccountId, ChangeEvent};
use url::Url;

mod query;
mod wire;

#[cfg(test)]
mod tests;

use wire::{ListAccessibleCustomersResponse, SearchStreamItem};

/// Public Google Ads API host.
pub const GOOGLE_ADS_BASE_URL: &str = "https://googleads.googleapis.com";
/// API version the adapter speaks.
pub const GOOGLE_ADS_API_VERSION: &str = "v16";
/// Largest row count the platform accepts for `change_event` queries.
pub const DEFAULT_CHANGE_EVENT_LIMIT: u32 = 10_000;

/// Connection settings for the Google Ads API.
#[derive(Debug, Clone)]
pub struct GoogleAdsConfig {
    /// API origin, without a path.
    pub base_url: Url,
    /// API version path segment, such as `v16`.
    pub api_version: String,
    /// Developer token issued for the API project.
    pub developer_token: String,
    /// Manager account to act through, when access is delegated.
    pub login_customer_id: Option<AccountId>,
    /// Row limit appended to change-log queries.
    pub change_event_limit: u32,
}

/// Google Ads API client.
pub struct GoogleAdsClient {
    http_client: reqwest::Client,
    config: GoogleAdsConfig,
}

impl GoogleAdsClient {
    /// Creates a client.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: GoogleAdsConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn endpoint(&self, resource: &str) -> AppResult<Url> {
        let raw = format!(
            "{}/{}/{resource}",
            self.config.base_url.as_str().trim_end_matches('/'),
            self.config.api_version
        );

        Url::parse(&raw)
            .map_err(|error| AppError::Internal(format!("invalid Google Ads endpoint '{raw}': {error}")))
    }

    fn authorize(
        &self,
        builder: reqwest::RequestBuilder,
        credentials: &Credentials,
    ) -> reqwest::RequestBuilder {
        let builder = builder
            .bearer_auth(credentials.access_token())
            .header("developer-token", self.config.developer_token.as_str());

        match &self.config.login_customer_id {
            Some(login_customer_id) => builder.header("login-customer-id", login_customer_id.as_str()),
            None => builder,
        }
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> AppResult<String> {
        let response = builder.send().await.map_err(|error| {
            AppError::Transport(format!("Google Ads {operation} failed: {error}"))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            AppError::Transport(format!(
                "Google Ads {operation} response could not be read: {error}"
            ))
        })?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized(
                "Google Ads refused the access token".to_owned(),
            ));
        }

        if status.is_server_error() {
            return Err(match wire::failure_from_body(&body) {
                Some(rejection) => AppError::Upstream(rejection),
                None => AppError::Transport(format!("Google Ads {operation} failed: HTTP {status}")),
            });
        }

        if !status.is_success() {
            return Err(AppError::Upstream(wire::rejection_from_body(status, &body)));
        }

        Ok(body)
    }
}

#[async_trait]
impl AccountDirectory for GoogleAdsClient {
    async fn list_accessible_accounts(
        &self,
        credentials: &Credentials,
    ) -> AppResult<Vec<AccountId>> {
        let url = self.endpoint("customers:listAccessibleCustomers")?;
        let body = self
            .send(
                self.authorize(self.http_client.get(url), credentials),
                "account listing",
            )
            .await?;

        let listing =
            serde_json::from_str::<ListAccessibleCustomersResponse>(&body).map_err(|error| {
                AppError::Internal(format!("unreadable Google Ads account listing: {error}"))
            })?;

        listing
            .resource_names
            .iter()
            .map(|resource_name| {
                AccountId::from_resource_name(resource_name)
                    .map_err(|error| AppError::Internal(error.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl ChangeLogSource for GoogleAdsClient {
    async fn search_change_events(
        &self,
        credentials: &Credentials,
        query: &ChangeEventQuery,
    ) -> AppResult<Vec<ChangeEvent>> {
        let url = self.endpoint(&format!(
            "customers/{}/googleAds:searchStream",
            query.account_id
        ))?;
        let gaql = query::change_event_query(query.range, self.config.change_event_limit);

        let body = self
            .send(
                self.authorize(self.http_client.post(url), credentials)
                    .json(&serde_json::json!({ "query": gaql })),
                "change history search",
            )
            .await?;

        let items = serde_json::from_str::<Vec<SearchStreamItem>>(&body).map_err(|error| {
            AppError::Internal(format!("unreadable Google Ads search stream: {error}"))
        })?;

        let mut events = Vec::new();
        for item in items {
            match item {
                SearchStreamItem::Failure(failure) => {
                    return Err(AppError::Upstream(failure.into_rejection()));
                }
                SearchStreamItem::Batch(batch) => {
                    if let Some(request_id) = &batch.request_id {
                        debug!(
                            account_id = %query.account_id,
                            request_id = %request_id,
                            rows = batch.results.len(),
                            "received change history batch"
                        );
                    }
                    events.extend(batch.into_events());
                }
            }
        }

        Ok(events)
    }
}
