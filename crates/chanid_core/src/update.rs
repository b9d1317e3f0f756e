use chanid_logging::{chanid_debug, chanid_info};

use crate::{parse_urls, AppState, Effect, Msg, SessionState};

const NOTICE_TITLE: &str = "Notice";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::StartClicked => {
            if state.session() == SessionState::Running {
                return (
                    state,
                    vec![Effect::warning(
                        NOTICE_TITLE,
                        "A batch is already running. Wait for it to finish.",
                    )],
                );
            }
            let urls = parse_urls(state.input());
            if urls.is_empty() {
                return (
                    state,
                    vec![Effect::warning(NOTICE_TITLE, "Please enter at least one URL.")],
                );
            }
            let batch_id = state.start_batch(urls.len());
            chanid_info!("Starting batch {} with {} url(s)", batch_id, urls.len());
            vec![Effect::StartBatch { batch_id, urls }]
        }
        Msg::ItemCompleted {
            batch_id,
            channel_id,
            success,
        } => {
            if state.is_current_batch(batch_id) {
                state.push_result(channel_id, success);
            } else {
                chanid_debug!("Ignoring result for stale batch {}", batch_id);
            }
            Vec::new()
        }
        Msg::Progress { batch_id, delta } => {
            if state.is_current_batch(batch_id) {
                state.apply_progress(delta);
                if state.session() == SessionState::Idle {
                    chanid_info!("Batch {} complete", batch_id);
                }
            } else {
                chanid_debug!("Ignoring progress for stale batch {}", batch_id);
            }
            Vec::new()
        }
        Msg::ResultSelected(index) => {
            state.select(index);
            Vec::new()
        }
        Msg::ResultActivated(index) => {
            if state.select(index) {
                copy_selected(&state)
            } else {
                Vec::new()
            }
        }
        Msg::CopyClicked => copy_selected(&state),
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn copy_selected(state: &AppState) -> Vec<Effect> {
    match state.selected_row() {
        Some(row) => vec![Effect::CopyToClipboard {
            text: row.channel_id.clone(),
        }],
        None => vec![Effect::warning(
            NOTICE_TITLE,
            "Please select an ID to copy.",
        )],
    }
}
