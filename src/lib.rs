pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod scrapers;

pub use error::ScrapeError;
pub use pipeline::ListingScraper;
