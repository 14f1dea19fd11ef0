use async_trait::async_trait;
use updatemate_core::{AppResult, Credentials};
use updatemate_domain::{AccountId, ChangeEvent, DateRange};

/// Change-log query for one account over one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEventQuery {
    /// Account whose change log is read.
    pub account_id: AccountId,
    /// Inclusive window of change timestamps.
    pub range: DateRange,
}

/// Platform port listing the accounts reachable with a set of credentials.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Returns every accessible account identifier, in platform order.
    async fn list_accessible_accounts(
        &self,
        credentials: &Credentials,
    ) -> AppResult<Vec<AccountId>>;
}

/// Platform port reading the configuration change log.
#[async_trait]
pub trait ChangeLogSource: Send + Sync {
    /// Returns matching change events, most recent first.
    ///
    /// Implementations issue a single query and drain every batch of its
    /// response before returning.
    async fn search_change_events(
        &self,
        credentials: &Credentials,
        query: &ChangeEventQuery,
    ) -> AppResult<Vec<ChangeEvent>>;
}
