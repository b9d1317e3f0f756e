use std::path::Path;
use std::sync::mpsc;

use chanid_core::{update, AppState, Msg};
use eframe::egui;

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::{logging, ui};

pub fn run_app() -> eframe::Result<()> {
    logging::initialize();
    let config = config::load_config(Path::new("."));

    eframe::run_native(
        ui::constants::APP_NAME,
        ui::layout::native_options(),
        Box::new(move |cc| {
            ui::layout::install_theme(&cc.egui_ctx, config.cjk_font.as_deref());
            Ok(Box::new(ChanidApp::new(cc.egui_ctx.clone(), config)))
        }),
    )
}

struct ChanidApp {
    state: AppState,
    input: String,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    effects: EffectRunner,
}

impl ChanidApp {
    fn new(ctx: egui::Context, config: AppConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let effects = EffectRunner::new(config.lookup, msg_tx.clone(), ctx);
        Self {
            state: AppState::new(),
            input: String::new(),
            msg_tx,
            msg_rx,
            effects,
        }
    }

    fn process_pending_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.run(effects);
    }
}

impl eframe::App for ChanidApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_messages();
        let view = self.state.view();
        ui::render::render(ctx, &view, &mut self.input, &self.msg_tx);

        // Widget messages from this frame are applied now and shown next frame.
        self.process_pending_messages();
        if self.state.consume_dirty() {
            ctx.request_repaint();
        }
    }
}
