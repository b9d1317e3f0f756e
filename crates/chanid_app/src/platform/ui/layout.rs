use std::fs;
use std::path::{Path, PathBuf};

use chanid_logging::{chanid_info, chanid_warn};
use eframe::egui::{self, FontData, FontDefinitions, FontFamily, TextStyle};

use super::constants::*;

const CJK_FONT_NAME: &str = "cjk";

/// Common locations of fonts covering Japanese glyphs.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/takao-gothic/TakaoPGothic.ttf",
];

pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(WINDOW_MIN_SIZE),
        ..Default::default()
    }
}

pub fn install_theme(ctx: &egui::Context, cjk_font: Option<&Path>) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    visuals.extreme_bg_color = FIELD_BACKGROUND;
    visuals.selection.bg_fill = ACCENT;
    visuals.widgets.inactive.weak_bg_fill = ACCENT;
    visuals.widgets.hovered.weak_bg_fill = ACCENT_HOVER;
    visuals.widgets.active.weak_bg_fill = ACCENT_HOVER;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    for text_style in [TextStyle::Body, TextStyle::Button, TextStyle::Monospace] {
        if let Some(font_id) = style.text_styles.get_mut(&text_style) {
            font_id.size = FONT_SIZE;
        }
    }
    ctx.set_style(style);

    install_cjk_font(ctx, cjk_font);
}

/// The bundled egui fonts have no Japanese glyphs, which the failure
/// sentinel and pasted channel names need.
fn install_cjk_font(ctx: &egui::Context, configured: Option<&Path>) {
    let candidates = configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(CJK_FONT_CANDIDATES.iter().map(PathBuf::from));

    for path in candidates {
        let Ok(bytes) = fs::read(&path) else {
            continue;
        };
        let mut fonts = FontDefinitions::default();
        fonts
            .font_data
            .insert(CJK_FONT_NAME.to_string(), FontData::from_owned(bytes));
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            fonts
                .families
                .entry(family)
                .or_default()
                .push(CJK_FONT_NAME.to_string());
        }
        ctx.set_fonts(fonts);
        chanid_info!("Using CJK font {:?}", path);
        return;
    }

    chanid_warn!("No CJK font found; Japanese text will not render");
}
