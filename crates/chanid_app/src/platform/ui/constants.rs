use eframe::egui::Color32;

pub const APP_NAME: &str = "chanid";
pub const WINDOW_TITLE: &str = "YouTube Channel ID Lookup";
pub const WINDOW_SIZE: [f32; 2] = [700.0, 650.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [420.0, 420.0];

pub const FONT_SIZE: f32 = 16.0;
pub const INPUT_HEIGHT: f32 = 150.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

pub const BACKGROUND: Color32 = Color32::from_rgb(0x1E, 0x1E, 0x1E);
pub const FIELD_BACKGROUND: Color32 = Color32::from_rgb(0x2C, 0x2C, 0x2C);
pub const ACCENT: Color32 = Color32::from_rgb(0x00, 0xBF, 0xFF);
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x1E, 0x90, 0xFF);
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x00, 0xFF, 0xFF);
pub const FAILURE_COLOR: Color32 = Color32::from_rgb(0xFF, 0x00, 0x00);

pub const INPUT_HINT: &str = "Enter channel URLs, one per line:";
pub const INPUT_PLACEHOLDER: &str = "https://www.youtube.com/@channel";
pub const START_LABEL: &str = "Look up all";
pub const RUNNING_LABEL: &str = "Looking up…";
pub const COPY_LABEL: &str = "Copy selected ID";
