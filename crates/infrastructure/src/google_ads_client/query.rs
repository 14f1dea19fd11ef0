use updatemate_domain::DateRange;

/// Builds the GAQL selecting every change event inside `range`, newest first.
///
/// Both ends are inclusive: the window opens at midnight of the first day and
/// closes at the last microsecond of the final day, the precision of
/// `change_date_time`.
pub(super) fn change_event_query(range: DateRange, limit: u32) -> String {
    format!(
        "SELECT \
         change_event.resource_name, \
         change_event.change_date_time, \
         change_event.change_resource_name, \
         change_event.user_email, \
         change_event.client_type, \
         change_event.change_resource_type \
         FROM change_event \
         WHERE change_event.change_date_time >= '{start} 00:00:00' \
         AND change_event.change_date_time <= '{end} 23:59:59.999999' \
         ORDER BY change_event.change_date_time DESC \
         LIMIT {limit}",
        start = range.start().format("%Y-%m-%d"),
        end = range.end().format("%Y-%m-%d"),
    )
}
