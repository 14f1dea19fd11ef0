mod sessions;
mod state_builder;

pub use sessions::{WebSessionLayer, build_session_layer};
pub use state_builder::build_app_state;

#[cfg(test)]
pub(crate) use sessions::memory_session_layer;
