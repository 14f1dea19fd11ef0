use std::sync::Arc;

use updatemate_core::{AppResult, Credentials};
use updatemate_domain::Account;

use crate::advertising_ports::AccountDirectory;

/// Application service listing selectable advertising accounts.
#[derive(Clone)]
pub struct AccountService {
    directory: Arc<dyn AccountDirectory>,
}

impl AccountService {
    /// Creates a service from a directory implementation.
    #[must_use]
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self { directory }
    }

    /// Lists every account the credentials can access.
    ///
    /// Always asks the platform; results are never cached across calls.
    pub async fn list_accounts(&self, credentials: &Credentials) -> AppResult<Vec<Account>> {
        Ok(self
            .directory
            .list_accessible_accounts(credentials)
            .await?
            .into_iter()
            .map(Account::with_synthetic_label)
            .collect())
    }
}
