use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chanid_engine::LookupSettings;
use chanid_logging::{chanid_info, chanid_warn};
use serde::Deserialize;

pub(crate) const CONFIG_FILENAME: &str = "chanid.ron";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AppConfig {
    pub lookup: LookupSettings,
    /// Font file used for CJK glyphs; system fonts are searched when unset.
    pub cjk_font: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        PersistedConfig::default().into()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PersistedConfig {
    target_url: String,
    input_placeholder: String,
    search_button_label: String,
    result_selector: String,
    id_marker: String,
    selector_timeout_ms: u64,
    page_timeout_ms: u64,
    poll_interval_ms: u64,
    max_concurrent_pages: usize,
    headless: bool,
    chrome_executable: Option<PathBuf>,
    cjk_font: Option<PathBuf>,
}

impl Default for PersistedConfig {
    fn default() -> Self {
        let lookup = LookupSettings::default();
        Self {
            target_url: lookup.target_url,
            input_placeholder: lookup.input_placeholder,
            search_button_label: lookup.search_button_label,
            result_selector: lookup.result_selector,
            id_marker: lookup.id_marker,
            selector_timeout_ms: duration_ms(lookup.selector_timeout),
            page_timeout_ms: duration_ms(lookup.page_timeout),
            poll_interval_ms: duration_ms(lookup.poll_interval),
            max_concurrent_pages: lookup.max_concurrent_pages,
            headless: lookup.headless,
            chrome_executable: lookup.chrome_executable,
            cjk_font: None,
        }
    }
}

impl From<PersistedConfig> for AppConfig {
    fn from(config: PersistedConfig) -> Self {
        AppConfig {
            lookup: LookupSettings {
                target_url: config.target_url,
                input_placeholder: config.input_placeholder,
                search_button_label: config.search_button_label,
                result_selector: config.result_selector,
                id_marker: config.id_marker,
                selector_timeout: Duration::from_millis(config.selector_timeout_ms),
                page_timeout: Duration::from_millis(config.page_timeout_ms),
                poll_interval: Duration::from_millis(config.poll_interval_ms),
                max_concurrent_pages: config.max_concurrent_pages,
                headless: config.headless,
                chrome_executable: config.chrome_executable,
            },
            cjk_font: config.cjk_font,
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Loads `chanid.ron` from `dir`. A missing or broken file yields the defaults.
pub(crate) fn load_config(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            chanid_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    let persisted: PersistedConfig = match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            chanid_warn!("Failed to parse config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    chanid_info!("Loaded config from {:?}", path);
    persisted.into()
}
