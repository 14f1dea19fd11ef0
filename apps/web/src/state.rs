use updatemate_application::{AccountService, AuthSessionService, ChangeHistoryService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub change_history_service: ChangeHistoryService,
    pub auth_session_service: AuthSessionService,
    pub public_origin: String,
}
