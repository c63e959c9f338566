use crate::error::ScrapeError;
use crate::scrapers::traits::HttpFetcher;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// reqwest-backed fetcher for listing detail reports
pub struct ReportClient {
    client: Client,
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

impl ReportClient {
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReportClient {
    async fn get(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Report returned status: {}", status);
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| ScrapeError::Request {
            url: url.to_string(),
            source,
        })?;

        debug!("Downloaded {} bytes of HTML", body.len());
        Ok(body)
    }
}
