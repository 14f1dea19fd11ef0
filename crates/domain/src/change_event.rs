//! Configuration change records.

use serde::{Deserialize, Serialize};

/// A recorded configuration change on an advertising account.
///
/// Values are kept exactly as the platform reported them; the timestamp is
/// the platform's local `change_date_time` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    changed_at: String,
    user_email: String,
    client_type: String,
    resource_type: String,
    resource_name: String,
}

impl ChangeEvent {
    /// Creates a change event from its reported columns.
    #[must_use]
    pub fn new(
        changed_at: impl Into<String>,
        user_email: impl Into<String>,
        client_type: impl Into<String>,
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
    ) -> Self {
        Self {
            changed_at: changed_at.into(),
            user_email: user_email.into(),
            client_type: client_type.into(),
            resource_type: resource_type.into(),
            resource_name: resource_name.into(),
        }
    }

    /// Returns when the change happened.
    #[must_use]
    pub fn changed_at(&self) -> &str {
        self.changed_at.as_str()
    }

    /// Returns the email of the user who made the change.
    #[must_use]
    pub fn user_email(&self) -> &str {
        self.user_email.as_str()
    }

    /// Returns the kind of client the change was made from.
    #[must_use]
    pub fn client_type(&self) -> &str {
        self.client_type.as_str()
    }

    /// Returns the type of the changed resource.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        self.resource_type.as_str()
    }

    /// Returns the resource name of the changed resource.
    #[must_use]
    pub fn resource_name(&self) -> &str {
        self.resource_name.as_str()
    }
}
