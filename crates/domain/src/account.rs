//! Advertising account identity.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use updatemate_core::{AppError, AppResult, NonEmptyString};

/// Platform-assigned advertising account (customer) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(NonEmptyString);

impl AccountId {
    /// Creates an account identifier.
    ///
    /// Accepts both the bare form (`1234567890`) and the dashed display form
    /// (`123-456-7890`). Anything other than digits is rejected, as the value
    /// ends up in request paths.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let normalized: String = value
            .into()
            .chars()
            .filter(|character| !character.is_whitespace() && *character != '-')
            .collect();

        if !normalized.chars().all(|character| character.is_ascii_digit()) {
            return Err(AppError::Validation(format!(
                "account id must contain only digits, got '{normalized}'"
            )));
        }

        NonEmptyString::new(normalized)
            .map(Self)
            .map_err(|_| AppError::Validation("account id must not be empty".to_owned()))
    }

    /// Extracts the identifier from a `customers/{id}` resource name.
    pub fn from_resource_name(resource_name: &str) -> AppResult<Self> {
        let id = resource_name.rsplit('/').next().unwrap_or_default();
        Self::new(id).map_err(|_| {
            AppError::Validation(format!(
                "resource name '{resource_name}' does not end with an account id"
            ))
        })
    }

    /// Returns the identifier as sent to the platform.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for AccountId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for AccountId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0.into()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// An advertising account the authenticated identity may access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    label: String,
}

impl Account {
    /// Wraps an identifier with the synthetic `Client {id}` label.
    ///
    /// The platform listing returns identifiers only, so no real account
    /// name is available.
    #[must_use]
    pub fn with_synthetic_label(id: AccountId) -> Self {
        let label = format!("Client {id}");
        Self { id, label }
    }

    /// Returns the account identifier.
    #[must_use]
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::{Account, AccountId};

    #[test]
    fn account_id_strips_display_dashes() {
        let id = AccountId::new(" 123-456-7890 ");
        assert_eq!(id.map(String::from).unwrap_or_default(), "1234567890");
    }

    #[test]
    fn account_id_rejects_empty_values() {
        assert!(AccountId::new("").is_err());
        assert!(AccountId::new(" - ").is_err());
    }

    #[test]
    fn account_id_rejects_non_numeric_values() {
        assert!(AccountId::new("12/../x").is_err());
        assert!(AccountId::new("abc").is_err());
        assert!(AccountId::new("123?page=2").is_err());
        assert!(AccountId::from_resource_name("customers/12#frag").is_err());
    }

    #[test]
    fn account_id_parses_resource_names() {
        let id = AccountId::from_resource_name("customers/9876543210");
        assert_eq!(id.map(String::from).unwrap_or_default(), "9876543210");
        assert!(AccountId::from_resource_name("customers/").is_err());
    }

    #[test]
    fn synthetic_label_names_the_client() {
        let account = AccountId::new("42").map(Account::with_synthetic_label);
        assert_eq!(
            account.as_ref().map(Account::label).unwrap_or_default(),
            "Client 42"
        );
    }
}
