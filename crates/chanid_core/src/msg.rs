use crate::BatchId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User clicked Start.
    StartClicked,
    /// Engine finished one URL of a batch.
    ItemCompleted {
        batch_id: BatchId,
        channel_id: String,
        success: bool,
    },
    /// Engine progress for a batch.
    Progress { batch_id: BatchId, delta: usize },
    /// User selected a row in the result list.
    ResultSelected(usize),
    /// User double-clicked a row: select it and copy.
    ResultActivated(usize),
    /// User clicked "Copy selected ID".
    CopyClicked,
    /// UI/render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
