use std::sync::mpsc;
use std::thread;

use chanid_core::{BatchId, Effect, Msg, Severity};
use chanid_engine::{EngineEvent, EngineHandle, LookupSettings, FAILURE_SENTINEL};
use chanid_logging::{chanid_error, chanid_info, chanid_warn};
use eframe::egui;

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    clipboard: Option<arboard::Clipboard>,
}

impl EffectRunner {
    pub fn new(settings: LookupSettings, msg_tx: mpsc::Sender<Msg>, ctx: egui::Context) -> Self {
        let (engine, events) = EngineHandle::new(settings);
        spawn_event_loop(events, msg_tx.clone(), ctx);
        Self {
            engine,
            msg_tx,
            clipboard: None,
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartBatch { batch_id, urls } => self.start_batch(batch_id, urls),
                Effect::ShowMessage {
                    severity,
                    title,
                    text,
                } => show_message(severity, &title, &text),
                Effect::CopyToClipboard { text } => match self.copy_to_clipboard(&text) {
                    Ok(()) => show_message(
                        Severity::Info,
                        "Copied",
                        &format!("Copied channel ID '{text}' to the clipboard."),
                    ),
                    Err(err) => {
                        chanid_warn!("Clipboard write failed: {}", err);
                        show_message(
                            Severity::Warning,
                            "Notice",
                            &format!("Could not access the clipboard: {err}"),
                        );
                    }
                },
            }
        }
    }

    fn start_batch(&self, batch_id: BatchId, urls: Vec<String>) {
        let count = urls.len();
        chanid_info!("StartBatch batch_id={} urls={}", batch_id, count);
        if let Err(err) = self.engine.start_batch(batch_id, urls) {
            chanid_error!("Failed to spawn batch {}: {}", batch_id, err);
            // Settle the batch so the session does not stay running.
            for _ in 0..count {
                let _ = self.msg_tx.send(Msg::ItemCompleted {
                    batch_id,
                    channel_id: FAILURE_SENTINEL.to_string(),
                    success: false,
                });
                let _ = self.msg_tx.send(Msg::Progress { batch_id, delta: 1 });
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), arboard::Error> {
        // Kept alive: on X11 the clipboard contents vanish with their owner.
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        self.clipboard.insert(clipboard).set_text(text)
    }
}

fn show_message(severity: Severity, title: &str, text: &str) {
    let level = match severity {
        Severity::Info => rfd::MessageLevel::Info,
        Severity::Warning => rfd::MessageLevel::Warning,
    };
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(text)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn spawn_event_loop(
    events: mpsc::Receiver<EngineEvent>,
    msg_tx: mpsc::Sender<Msg>,
    ctx: egui::Context,
) {
    let spawned = thread::Builder::new()
        .name("chanid-events".to_string())
        .spawn(move || {
            while let Ok(event) = events.recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
                ctx.request_repaint();
            }
        });
    if let Err(err) = spawned {
        chanid_error!("Failed to spawn engine event thread: {}", err);
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::Progress {
            batch_id: progress.batch_id,
            delta: progress.delta,
        },
        EngineEvent::ItemCompleted { batch_id, outcome } => Msg::ItemCompleted {
            batch_id,
            channel_id: outcome.channel_id,
            success: outcome.success,
        },
    }
}
