use std::sync::mpsc;

use chanid_core::{AppViewModel, Msg, ResultRowView};
use eframe::egui::{self, Button, ProgressBar, RichText, ScrollArea, TextEdit, TextStyle};

use super::constants::*;

pub fn render(
    ctx: &egui::Context,
    view: &AppViewModel,
    input: &mut String,
    msg_tx: &mpsc::Sender<Msg>,
) {
    let send = |msg: Msg| {
        let _ = msg_tx.send(msg);
    };

    egui::TopBottomPanel::bottom("copy_panel")
        .frame(egui::Frame::none().fill(BACKGROUND).inner_margin(8.0))
        .show(ctx, |ui| {
            let copy = Button::new(RichText::new(COPY_LABEL).strong())
                .min_size(egui::vec2(ui.available_width(), BUTTON_HEIGHT));
            if ui.add(copy).clicked() {
                send(Msg::CopyClicked);
            }
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.label(INPUT_HINT);
        let edit = TextEdit::multiline(input)
            .font(TextStyle::Monospace)
            .hint_text(INPUT_PLACEHOLDER);
        if ui
            .add_sized([ui.available_width(), INPUT_HEIGHT], edit)
            .changed()
        {
            send(Msg::InputChanged(input.clone()));
        }
        ui.add_space(6.0);

        let start_label = if view.is_running() {
            RUNNING_LABEL
        } else {
            START_LABEL
        };
        let start = Button::new(RichText::new(start_label).strong())
            .min_size(egui::vec2(ui.available_width(), BUTTON_HEIGHT));
        if ui.add_enabled(!view.is_running(), start).clicked() {
            send(Msg::StartClicked);
        }
        ui.add_space(6.0);

        ui.add(
            ProgressBar::new(view.progress_fraction())
                .fill(ACCENT)
                .text(format!("{:.0}%", view.progress_fraction() * 100.0)),
        );
        ui.label(view.progress_label());
        ui.separator();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for row in &view.results {
                    if let Some(msg) = render_row(ui, row) {
                        send(msg);
                    }
                }
            });
    });
}

fn render_row(ui: &mut egui::Ui, row: &ResultRowView) -> Option<Msg> {
    let color = if row.success {
        SUCCESS_COLOR
    } else {
        FAILURE_COLOR
    };
    let response = ui.selectable_label(row.selected, RichText::new(&row.text).color(color));
    if response.double_clicked() {
        Some(Msg::ResultActivated(row.index))
    } else if response.clicked() {
        Some(Msg::ResultSelected(row.index))
    } else {
        None
    }
}
