use crate::BatchId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand a batch of trimmed, non-empty URLs to the engine.
    StartBatch { batch_id: BatchId, urls: Vec<String> },
    /// Show a modal message to the user.
    ShowMessage {
        severity: Severity,
        title: String,
        text: String,
    },
    /// Write the given text to the system clipboard.
    CopyToClipboard { text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

impl Effect {
    pub(crate) fn warning(title: &str, text: impl Into<String>) -> Self {
        Effect::ShowMessage {
            severity: Severity::Warning,
            title: title.to_string(),
            text: text.into(),
        }
    }
}
