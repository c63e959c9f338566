use crate::error::ScrapeError;
use crate::scrapers::traits::NavigableSession;
use crate::scrapers::types::BrowserOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

const FRAME_DOCUMENT_JS: &str = r#"
function() {
    const doc = this.contentDocument;
    return doc ? doc.documentElement.outerHTML : null;
}
"#;

/// Headless Chrome session used to read the listing index.
/// The browser process is shut down when this is dropped.
pub struct HeadlessSession {
    // Field order matters: the tab goes before the browser that owns it.
    tab: Arc<Tab>,
    _browser: Browser,
    settle: Duration,
}

impl HeadlessSession {
    /// Launch Chrome with the configured binary and open a blank tab
    pub fn launch(options: &BrowserOptions) -> Result<Self, ScrapeError> {
        info!("Launching Chrome (headless: {})...", options.headless);

        let launch = LaunchOptions::default_builder()
            .headless(options.headless)
            .path(options.executable_path.clone())
            .build()
            .map_err(|e| ScrapeError::browser("build launch options", e))?;

        let browser =
            Browser::new(launch).map_err(|e| ScrapeError::browser("launch Chrome", e))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::browser("open a tab", e))?;

        Ok(Self {
            tab,
            _browser: browser,
            settle: Duration::from_secs(options.settle_secs),
        })
    }
}

impl NavigableSession for HeadlessSession {
    fn open(&mut self, url: &str) -> Result<(), ScrapeError> {
        debug!("Navigating to {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| ScrapeError::browser(format!("navigate to {url}"), e))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::browser(format!("load {url}"), e))?;

        // Frames load after the frameset document itself
        thread::sleep(self.settle);
        Ok(())
    }

    fn frame_html(&self, xpath: &str) -> Result<String, ScrapeError> {
        let frame = self
            .tab
            .wait_for_xpath(xpath)
            .map_err(|e| ScrapeError::Structure(format!("frame {xpath} not found: {e:#}")))?;

        let result = frame
            .call_js_fn(FRAME_DOCUMENT_JS, vec![], false)
            .map_err(|e| ScrapeError::browser("read frame document", e))?;

        let html = result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ScrapeError::Structure(format!("frame {xpath} has no readable document"))
            })?;

        debug!("Frame document is {} bytes", html.len());
        Ok(html)
    }
}
