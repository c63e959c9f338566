use crate::error::ScrapeError;
use crate::models::{ListingIdentifier, ListingRecord, ResultTable};
use crate::scrapers::{extract_record, listing_ids, HttpFetcher, NavigableSession, ScrapeConfig};
use tracing::info;

/// Drives one scrape: enumerate listings in the browser, then fetch and
/// extract each detail report in turn.
pub struct ListingScraper<F> {
    config: ScrapeConfig,
    fetcher: F,
}

impl<F: HttpFetcher> ListingScraper<F> {
    pub fn new(config: ScrapeConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Collect listing identifiers from the index frame.
    ///
    /// Takes the session by value: it is dropped (and the browser closed)
    /// before this returns, whether enumeration succeeded or not.
    pub fn enumerate<S: NavigableSession>(
        &self,
        mut session: S,
    ) -> Result<Vec<ListingIdentifier>, ScrapeError> {
        let layout = &self.config.layout;
        let index_url = self.config.index_url();

        info!("Opening listing index (layout {})...", layout.version);
        let ids = session
            .open(&index_url)
            .and_then(|_| session.frame_html(&layout.frame_xpath))
            .and_then(|html| listing_ids(&html, layout));

        drop(session);
        info!("Browser session closed");

        let ids = ids?;
        info!("Found {} listings", ids.len());
        Ok(ids)
    }

    /// Fetch one detail report and extract its fields
    pub async fn scrape_listing(
        &self,
        id: &ListingIdentifier,
    ) -> Result<ListingRecord, ScrapeError> {
        let url = self.config.detail_url(id);
        info!("Link: {}", url);

        let delay = self.config.request_delay()?;
        let html = self.fetcher.get(&url).await?;
        tokio::time::sleep(delay).await;

        extract_record(
            id,
            &html,
            &self.config.layout,
            &self.config.field_map,
            &self.config.placeholder,
        )
    }

    /// Full run: enumerate, then fetch and extract every listing in order
    pub async fn run<S: NavigableSession>(&self, session: S) -> Result<ResultTable, ScrapeError> {
        let ids = self.enumerate(session)?;

        let mut table = ResultTable::for_fields(&self.config.field_map);
        for (i, id) in ids.iter().enumerate() {
            info!("Listing {}/{}: {}", i + 1, ids.len(), id);
            let record = self.scrape_listing(id).await?;
            table.push(record)?;
        }

        info!("Scraped {} listings", table.len());
        Ok(table)
    }
}
