//! Plain-text change report.

use std::fmt::Write;

use crate::ChangeEvent;

/// Line closing every event block in a report.
pub const REPORT_SEPARATOR: &str = "--------------------------------------------------";

/// Formats change events as a plain-text report.
///
/// Each event becomes a five-line block followed by [`REPORT_SEPARATOR`],
/// in input order. An empty slice yields an empty report.
#[must_use]
pub fn summarize(events: &[ChangeEvent]) -> String {
    let mut report = String::new();

    for event in events {
        // Writing into a String cannot fail.
        let _ = write!(
            report,
            "Date: {}\nUser: {}\nClient Type: {}\nResource Type: {}\nResource Name: {}\n{REPORT_SEPARATOR}\n",
            event.changed_at(),
            event.user_email(),
            event.client_type(),
            event.resource_type(),
            event.resource_name(),
        );
    }

    report
}
