pub mod browser;
pub mod enumerate;
pub mod extract;
pub mod report;
pub mod traits;
pub mod types;

pub use browser::HeadlessSession;
pub use enumerate::listing_ids;
pub use extract::extract_record;
pub use report::ReportClient;
pub use traits::{HttpFetcher, NavigableSession};
pub use types::{BrowserOptions, ReportParams, ScrapeConfig, SiteLayout};
