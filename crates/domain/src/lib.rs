//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod account;
mod change_event;
mod date_range;
mod report;

pub use account::{Account, AccountId};
pub use change_event::ChangeEvent;
pub use date_range::{ChangeWindow, DateRange};
pub use report::{REPORT_SEPARATOR, summarize};
