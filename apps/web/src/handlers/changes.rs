use axum::Form;
use axum::extract::State;
use tracing::{info, warn};
use updatemate_application::ChangeSummary;

use crate::auth_session::AuthSession;
use crate::dto::FetchChangesForm;
use crate::error::WebResult;
use crate::state::AppState;

use super::fresh_credentials;

pub async fn fetch_changes_handler(
    State(state): State<AppState>,
    auth_session: AuthSession,
    Form(form): Form<FetchChangesForm>,
) -> WebResult<String> {
    let account_id = form.account_id()?;
    let window = form.window()?;
    let credentials = fresh_credentials(&state, &auth_session).await?;

    let summary = state
        .change_history_service
        .summarize_changes(&credentials, &account_id, window)
        .await?;

    if summary.range.is_inverted() {
        warn!(
            account_id = %summary.account_id,
            range = %summary.range,
            "change window ends before it starts"
        );
    }
    info!(
        account_id = %summary.account_id,
        events = summary.event_count,
        "change report generated"
    );

    Ok(render_summary(&summary))
}

fn render_summary(summary: &ChangeSummary) -> String {
    let heading = format!(
        "Change history for account {} from {} ({} changes)",
        summary.account_id, summary.range, summary.event_count
    );

    if summary.event_count == 0 {
        return format!("{heading}\n\nNo changes found.\n");
    }

    format!("{heading}\n\n{}", summary.report)
}
