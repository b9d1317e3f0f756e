use crate::view_model::{AppViewModel, ResultRowView};

pub type BatchId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub channel_id: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    session: SessionState,
    batch_id: BatchId,
    total: usize,
    completed: usize,
    results: Vec<ResultRow>,
    selected: Option<usize>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            batch_id: self.batch_id,
            total: self.total,
            completed: self.completed,
            results: self
                .results
                .iter()
                .enumerate()
                .map(|(index, row)| ResultRowView {
                    index,
                    text: row.channel_id.clone(),
                    success: row.success,
                    selected: self.selected == Some(index),
                })
                .collect(),
            selected: self.selected,
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns whether state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.dirty = true;
        }
    }

    /// Resets per-batch state and returns the id of the new batch.
    pub(crate) fn start_batch(&mut self, total: usize) -> BatchId {
        self.batch_id += 1;
        self.session = SessionState::Running;
        self.total = total;
        self.completed = 0;
        self.results.clear();
        self.selected = None;
        self.dirty = true;
        self.batch_id
    }

    pub(crate) fn is_current_batch(&self, batch_id: BatchId) -> bool {
        self.session == SessionState::Running && self.batch_id == batch_id
    }

    pub(crate) fn push_result(&mut self, channel_id: String, success: bool) {
        self.results.push(ResultRow {
            channel_id,
            success,
        });
        self.dirty = true;
    }

    pub(crate) fn apply_progress(&mut self, delta: usize) {
        self.completed = self.completed.saturating_add(delta).min(self.total);
        if self.completed == self.total {
            self.session = SessionState::Idle;
        }
        self.dirty = true;
    }

    pub(crate) fn select(&mut self, index: usize) -> bool {
        if index >= self.results.len() {
            return false;
        }
        if self.selected != Some(index) {
            self.selected = Some(index);
            self.dirty = true;
        }
        true
    }

    pub(crate) fn selected_row(&self) -> Option<&ResultRow> {
        self.selected.and_then(|index| self.results.get(index))
    }
}

/// Splits raw input into trimmed, non-empty lines.
pub fn parse_urls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
