//! chanid core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Severity};
pub use msg::Msg;
pub use state::{parse_urls, AppState, BatchId, ResultRow, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, ResultRowView};
