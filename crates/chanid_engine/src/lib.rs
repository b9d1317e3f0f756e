//! chanid engine: browser-driven channel ID lookups and batch execution.
mod banner;
mod batch;
mod engine;
mod extract;
mod lookup;
mod settings;
mod types;

pub use banner::{banner_text, parse_channel_id};
pub use batch::{run_batch, BatchSummary, ChannelEventSink, EventSink};
pub use engine::EngineHandle;
pub use extract::extract_channel;
pub use lookup::{BrowserLauncher, ChannelLookup, ChromiumLauncher, LookupPage};
pub use settings::LookupSettings;
pub use types::{
    BatchId, BatchProgress, EngineEvent, ExtractionOutcome, FailureKind, LookupError,
    FAILURE_SENTINEL,
};
