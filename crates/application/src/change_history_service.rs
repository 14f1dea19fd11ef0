use std::sync::Arc;

use updatemate_core::{AppResult, Credentials};
use updatemate_domain::{AccountId, ChangeEvent, ChangeWindow, DateRange, summarize};

use crate::advertising_ports::{ChangeEventQuery, ChangeLogSource};
use crate::identity_ports::Clock;

#[cfg(test)]
mod tests;

/// Change report for one account and window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSummary {
    /// Account the report covers.
    pub account_id: AccountId,
    /// Window the report covers.
    pub range: DateRange,
    /// Number of change events in the report.
    pub event_count: usize,
    /// Formatted report text.
    pub report: String,
}

/// Application service reading and summarizing account change history.
#[derive(Clone)]
pub struct ChangeHistoryService {
    source: Arc<dyn ChangeLogSource>,
    clock: Arc<dyn Clock>,
}

impl ChangeHistoryService {
    /// Creates a service from a change-log source and a clock.
    #[must_use]
    pub fn new(source: Arc<dyn ChangeLogSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    /// Fetches the changes of the last `days` days, today included.
    pub async fn fetch_changes(
        &self,
        credentials: &Credentials,
        account_id: &AccountId,
        days: i64,
    ) -> AppResult<Vec<ChangeEvent>> {
        let range = DateRange::trailing_days(self.clock.today(), days)?;
        self.fetch_changes_in_range(credentials, account_id, range)
            .await
    }

    /// Fetches the changes inside `range`, in the order the platform returns them.
    pub async fn fetch_changes_in_range(
        &self,
        credentials: &Credentials,
        account_id: &AccountId,
        range: DateRange,
    ) -> AppResult<Vec<ChangeEvent>> {
        let query = ChangeEventQuery {
            account_id: account_id.clone(),
            range,
        };

        self.source.search_change_events(credentials, &query).await
    }

    /// Resolves `window`, fetches its changes, and formats the report.
    pub async fn summarize_changes(
        &self,
        credentials: &Credentials,
        account_id: &AccountId,
        window: ChangeWindow,
    ) -> AppResult<ChangeSummary> {
        let range = window.resolve(self.clock.today())?;
        let events = self
            .fetch_changes_in_range(credentials, account_id, range)
            .await?;

        Ok(ChangeSummary {
            account_id: account_id.clone(),
            range,
            event_count: events.len(),
            report: summarize(&events),
        })
    }
}
