//! Reporting windows.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use updatemate_core::{AppError, AppResult};

/// Inclusive calendar window `[start, end]`.
///
/// Ordering of the two ends is not enforced: an inverted window is
/// representable and simply matches nothing upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a window from explicit dates.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Creates the window `[today - days, today]`.
    pub fn trailing_days(today: NaiveDate, days: i64) -> AppResult<Self> {
        let start = TimeDelta::try_days(days)
            .and_then(|offset| today.checked_sub_signed(offset))
            .ok_or_else(|| {
                AppError::Validation(format!("day count {days} is outside the supported calendar"))
            })?;

        Ok(Self { start, end: today })
    }

    /// Returns the first included day.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last included day.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns whether the window ends before it starts.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} to {}", self.start, self.end)
    }
}

/// The user-facing ways of choosing a reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeWindow {
    /// The last `n` days up to and including today.
    TrailingDays(i64),
    /// An explicit inclusive date pair.
    Between {
        /// First included day.
        start: NaiveDate,
        /// Last included day.
        end: NaiveDate,
    },
}

impl ChangeWindow {
    /// Normalizes the window to concrete dates relative to `today`.
    pub fn resolve(self, today: NaiveDate) -> AppResult<DateRange> {
        match self {
            Self::TrailingDays(days) => DateRange::trailing_days(today, days),
            Self::Between { start, end } => Ok(DateRange::new(start, end)),
        }
    }
}
