use crate::error::ScrapeError;
use async_trait::async_trait;

/// A browser session that can load the listing index.
/// Dropping the session releases the browser.
pub trait NavigableSession {
    /// Navigate to `url` and wait for it to load
    fn open(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// Serialized document of the frame found at `xpath` on the current page
    fn frame_html(&self, xpath: &str) -> Result<String, ScrapeError>;
}

/// Plain HTTP GET for listing detail reports
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetch `url` and return the response body
    async fn get(&self, url: &str) -> Result<String, ScrapeError>;
}
