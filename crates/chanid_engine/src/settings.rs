use std::path::PathBuf;
use std::time::Duration;

/// Contract points of the lookup site plus timing and resource limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSettings {
    pub target_url: String,
    /// `placeholder` attribute of the URL input field.
    pub input_placeholder: String,
    /// Visible text of the search button.
    pub search_button_label: String,
    /// CSS selector of the success banner.
    pub result_selector: String,
    /// Text preceding the channel ID inside the banner.
    pub id_marker: String,
    /// How long to wait for the success banner after submitting.
    pub selector_timeout: Duration,
    /// Upper bound for one URL from page open to banner text.
    pub page_timeout: Duration,
    pub poll_interval: Duration,
    pub max_concurrent_pages: usize,
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            target_url: "https://seostudio.tools/ja/youtube-channel-id".to_string(),
            input_placeholder: "https://...".to_string(),
            search_button_label: "今すぐ検索".to_string(),
            result_selector: "div.alert.alert-important.alert-success".to_string(),
            id_marker: "チャンネルID:".to_string(),
            selector_timeout: Duration::from_secs(10),
            page_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(200),
            max_concurrent_pages: 4,
            headless: true,
            chrome_executable: None,
        }
    }
}

impl LookupSettings {
    pub fn input_selector(&self) -> String {
        format!(
            "input[placeholder='{}']",
            self.input_placeholder.replace('\'', "\\'")
        )
    }

    /// Number of pages allowed in flight at once; never zero.
    pub fn concurrency_limit(&self) -> usize {
        self.max_concurrent_pages.max(1)
    }
}
