use anyhow::Context;
use listing_report_scraper::export::{export_table, render_summary};
use listing_report_scraper::scrapers::{HeadlessSession, ReportClient, ScrapeConfig};
use listing_report_scraper::ListingScraper;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "scrape_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 Listing Report Scraper");
    info!("==========================================");

    let config = if Path::new(CONFIG_FILE).exists() {
        info!("Loading configuration from {}", CONFIG_FILE);
        ScrapeConfig::load(CONFIG_FILE).context("Failed to load configuration")?
    } else {
        info!("No {} found, using built-in configuration", CONFIG_FILE);
        let config = ScrapeConfig::default();
        config.validate().context("Built-in configuration is invalid")?;
        config
    };

    let fetcher = ReportClient::new().context("Failed to create HTTP client")?;
    let session =
        HeadlessSession::launch(&config.browser).context("Failed to launch Chrome browser")?;

    let scraper = ListingScraper::new(config, fetcher);
    let table = scraper.run(session).await.context("Scrape failed")?;

    info!("\n✅ Scraped {} listings\n", table.len());
    println!("{}", render_summary(&table));

    let output = &scraper.config().output_path;
    export_table(&table, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}
