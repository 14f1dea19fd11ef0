use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use updatemate_application::AuthorizationCallback;
use updatemate_core::{AppError, AppResult};
use updatemate_domain::{Account, AccountId, ChangeWindow};

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Selectable advertising account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
}

impl From<Account> for AccountResponse {
    fn from(value: Account) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.label().to_owned(),
        }
    }
}

/// Query parameters the identity provider appends to the callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl From<CallbackQuery> for AuthorizationCallback {
    fn from(value: CallbackQuery) -> Self {
        Self {
            code: value.code,
            state: value.state,
            error: value.error,
            error_description: value.error_description,
        }
    }
}

/// Change-report form.
///
/// The window is either an explicit `start_date`/`end_date` pair or a
/// `date_range` day count. Blank fields count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct FetchChangesForm {
    #[serde(alias = "account_id")]
    pub client_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub date_range: Option<String>,
}

impl FetchChangesForm {
    pub fn account_id(&self) -> AppResult<AccountId> {
        let raw = present(self.client_id.as_deref())
            .ok_or_else(|| AppError::Validation("client_id is required".to_owned()))?;

        AccountId::new(raw)
    }

    pub fn window(&self) -> AppResult<ChangeWindow> {
        let start = present(self.start_date.as_deref());
        let end = present(self.end_date.as_deref());
        let days = present(self.date_range.as_deref());

        match (start, end, days) {
            (None, None, Some(days)) => days
                .parse::<i64>()
                .map(ChangeWindow::TrailingDays)
                .map_err(|_| {
                    AppError::Validation(format!("date_range must be a whole number of days, got '{days}'"))
                }),
            (Some(start), Some(end), None) => Ok(ChangeWindow::Between {
                start: parse_date("start_date", start)?,
                end: parse_date("end_date", end)?,
            }),
            (None, None, None) => Err(AppError::Validation(
                "provide start_date and end_date, or date_range".to_owned(),
            )),
            (_, _, Some(_)) => Err(AppError::Validation(
                "provide either start_date and end_date or date_range, not both".to_owned(),
            )),
            (Some(_), None, None) => {
                Err(AppError::Validation("end_date is required with start_date".to_owned()))
            }
            (None, Some(_), None) => {
                Err(AppError::Validation("start_date is required with end_date".to_owned()))
            }
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|error| {
        AppError::Validation(format!("{field} must be a YYYY-MM-DD date, got '{value}': {error}"))
    })
}
