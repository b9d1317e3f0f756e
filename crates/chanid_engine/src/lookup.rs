use chanid_logging::{chanid_debug, chanid_info, chanid_warn};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::banner::banner_text;
use crate::{FailureKind, LookupError, LookupSettings};

/// Starts one browser session to be shared by every lookup of a batch.
#[async_trait::async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn ChannelLookup>, LookupError>;
}

/// A live browser session; each lookup gets its own page.
#[async_trait::async_trait]
pub trait ChannelLookup: Send + Sync {
    async fn open_page(&self) -> Result<Box<dyn LookupPage>, LookupError>;

    async fn close(self: Box<Self>);
}

/// One browser tab on the lookup site.
#[async_trait::async_trait]
pub trait LookupPage: Send + Sync {
    /// Submits `url` and returns the text of the success banner.
    async fn submit(&self, url: &str) -> Result<String, LookupError>;

    async fn close(self: Box<Self>);
}

#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    settings: LookupSettings,
}

impl ChromiumLauncher {
    pub fn new(settings: LookupSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self) -> Result<BrowserConfig, LookupError> {
        let mut builder = BrowserConfig::builder();
        if !self.settings.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        builder
            .build()
            .map_err(|err| LookupError::new(FailureKind::Launch, err))
    }
}

#[async_trait::async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn ChannelLookup>, LookupError> {
        let config = self.browser_config()?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| LookupError::new(FailureKind::Launch, err.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    chanid_debug!("Browser handler error: {}", err);
                }
            }
        });
        chanid_info!("Browser launched (headless={})", self.settings.headless);

        Ok(Box::new(ChromiumLookup {
            browser,
            handler_task,
            settings: self.settings.clone(),
        }))
    }
}

struct ChromiumLookup {
    browser: Browser,
    handler_task: JoinHandle<()>,
    settings: LookupSettings,
}

#[async_trait::async_trait]
impl ChannelLookup for ChromiumLookup {
    async fn open_page(&self) -> Result<Box<dyn LookupPage>, LookupError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(browser_error)?;
        Ok(Box::new(ChromiumPage {
            page,
            settings: self.settings.clone(),
        }))
    }

    async fn close(self: Box<Self>) {
        let ChromiumLookup {
            mut browser,
            handler_task,
            ..
        } = *self;
        if let Err(err) = browser.close().await {
            chanid_warn!("Failed to close browser: {}", err);
        }
        if let Err(err) = browser.wait().await {
            chanid_warn!("Failed waiting for browser exit: {}", err);
        }
        handler_task.abort();
        chanid_info!("Browser closed");
    }
}

struct ChromiumPage {
    page: Page,
    settings: LookupSettings,
}

impl ChromiumPage {
    async fn click_search_button(&self) -> Result<(), LookupError> {
        let label = &self.settings.search_button_label;
        let clicked: bool = self
            .page
            .evaluate(click_button_script(label)?)
            .await
            .map_err(browser_error)?
            .into_value()
            .map_err(|err| LookupError::new(FailureKind::Browser, err.to_string()))?;
        if clicked {
            Ok(())
        } else {
            Err(LookupError::new(
                FailureKind::ElementNotFound,
                format!("no button labelled {label:?}"),
            ))
        }
    }

    async fn wait_for_banner(&self) -> Result<String, LookupError> {
        let deadline = Instant::now() + self.settings.selector_timeout;
        loop {
            let html = self.page.content().await.map_err(browser_error)?;
            if let Some(text) = banner_text(&html, &self.settings.result_selector)? {
                return Ok(text);
            }
            if Instant::now() >= deadline {
                return Err(LookupError::new(
                    FailureKind::Timeout,
                    format!(
                        "{} did not appear within {:?}",
                        self.settings.result_selector, self.settings.selector_timeout
                    ),
                ));
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}

#[async_trait::async_trait]
impl LookupPage for ChromiumPage {
    async fn submit(&self, url: &str) -> Result<String, LookupError> {
        self.page
            .goto(self.settings.target_url.as_str())
            .await
            .map_err(|err| LookupError::new(FailureKind::Navigation, err.to_string()))?;

        let input_selector = self.settings.input_selector();
        let input = self
            .page
            .find_element(input_selector.as_str())
            .await
            .map_err(|err| {
                LookupError::new(
                    FailureKind::ElementNotFound,
                    format!("{input_selector}: {err}"),
                )
            })?;
        input
            .click()
            .await
            .map_err(browser_error)?
            .type_str(url)
            .await
            .map_err(browser_error)?;

        self.click_search_button().await?;
        self.wait_for_banner().await
    }

    async fn close(self: Box<Self>) {
        if let Err(err) = self.page.close().await {
            chanid_debug!("Failed to close page: {}", err);
        }
    }
}

fn browser_error(err: chromiumoxide::error::CdpError) -> LookupError {
    LookupError::new(FailureKind::Browser, err.to_string())
}

/// Script clicking the first `<button>` whose text contains `label`.
fn click_button_script(label: &str) -> Result<String, LookupError> {
    let label = serde_json::to_string(label)
        .map_err(|err| LookupError::new(FailureKind::Browser, err.to_string()))?;
    Ok(format!(
        "(() => {{ \
            const label = {label}; \
            const button = Array.from(document.querySelectorAll('button')) \
                .find((b) => b.innerText.includes(label)); \
            if (!button) {{ return false; }} \
            button.click(); \
            return true; \
        }})()"
    ))
}
