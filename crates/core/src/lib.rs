//! Shared primitives for all Rust crates in Updatemate.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::Credentials;

/// Result type used across Updatemate crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// One error reported by the advertising platform for a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamFieldError {
    /// Human-readable message from the platform.
    pub message: String,
    /// Dotted path of the offending request field, when the platform names one.
    pub field_path: Option<String>,
}

impl UpstreamFieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(message: impl Into<String>, field_path: Option<String>) -> Self {
        Self {
            message: message.into(),
            field_path,
        }
    }
}

impl Display for UpstreamFieldError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.field_path {
            Some(field_path) => write!(formatter, "{} (field: {field_path})", self.message),
            None => formatter.write_str(&self.message),
        }
    }
}

/// A request the advertising platform refused, with every reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamRejection {
    /// Platform request identifier, useful when contacting platform support.
    pub request_id: Option<String>,
    /// Reported failures in the order the platform listed them.
    pub errors: Vec<UpstreamFieldError>,
}

impl UpstreamRejection {
    /// Creates a rejection from its reported failures.
    #[must_use]
    pub fn new(request_id: Option<String>, errors: Vec<UpstreamFieldError>) -> Self {
        Self { request_id, errors }
    }
}

impl Display for UpstreamRejection {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.request_id {
            Some(request_id) => write!(
                formatter,
                "request '{request_id}' was rejected by the advertising platform"
            )?,
            None => formatter.write_str("request was rejected by the advertising platform")?,
        }

        for error in &self.errors {
            write!(formatter, "\n  - {error}")?;
        }

        Ok(())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Credentials are missing, expired, or were refused.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The advertising platform rejected the request.
    #[error("{0}")]
    Upstream(UpstreamRejection),

    /// The advertising platform or identity provider could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
