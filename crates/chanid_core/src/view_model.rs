use crate::{BatchId, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub batch_id: BatchId,
    pub total: usize,
    pub completed: usize,
    pub results: Vec<ResultRowView>,
    pub selected: Option<usize>,
}

impl AppViewModel {
    pub fn is_running(&self) -> bool {
        self.session == SessionState::Running
    }

    /// Fraction of the batch completed, in `0.0..=1.0`.
    pub fn progress_fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }

    pub fn progress_label(&self) -> String {
        format!("{}/{} completed", self.completed, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub index: usize,
    pub text: String,
    pub success: bool,
    pub selected: bool,
}
