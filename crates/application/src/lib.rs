//! Application services and ports.

#![forbid(unsafe_code)]

mod account_service;
mod advertising_ports;
mod auth_session_service;
mod change_history_service;
mod identity_ports;

pub use account_service::AccountService;
pub use advertising_ports::{AccountDirectory, ChangeEventQuery, ChangeLogSource};
pub use auth_session_service::{
    AuthSessionService, AuthorizationCallback, FreshCredentials, LoginRequest,
};
pub use change_history_service::{ChangeHistoryService, ChangeSummary};
pub use identity_ports::{Clock, IdentityProvider, SystemClock};
