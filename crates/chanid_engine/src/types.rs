use std::fmt;

pub type BatchId = u64;

/// Shown in place of a channel ID when a lookup does not succeed.
pub const FAILURE_SENTINEL: &str = "取得失敗";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOutcome {
    pub url: String,
    pub channel_id: String,
    pub success: bool,
}

impl ExtractionOutcome {
    pub fn success(url: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            channel_id: channel_id.into(),
            success: true,
        }
    }

    pub fn failure(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            channel_id: FAILURE_SENTINEL.to_string(),
            success: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub batch_id: BatchId,
    pub delta: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(BatchProgress),
    ItemCompleted {
        batch_id: BatchId,
        outcome: ExtractionOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct LookupError {
    pub kind: FailureKind,
    pub message: String,
}

impl LookupError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Launch,
    Navigation,
    ElementNotFound,
    Timeout,
    MarkerMissing,
    InvalidSelector,
    Browser,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Launch => write!(f, "browser launch failed"),
            FailureKind::Navigation => write!(f, "navigation failed"),
            FailureKind::ElementNotFound => write!(f, "element not found"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MarkerMissing => write!(f, "channel id marker missing"),
            FailureKind::InvalidSelector => write!(f, "invalid selector"),
            FailureKind::Browser => write!(f, "browser error"),
        }
    }
}
