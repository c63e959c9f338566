use crate::error::ScrapeError;
use crate::models::{FieldMap, ListingIdentifier};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Run configuration for a report scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Report root, e.g. `https://host/ParagonLS/publink/view.mvc`
    pub base_url: String,
    /// Session GUID embedded in every report URL
    pub guid: String,
    /// Fixed pause after each detail request
    pub request_delay_secs: f64,
    /// Destination file; the extension picks the format
    pub output_path: PathBuf,
    /// Written in place of empty field text
    pub placeholder: String,
    pub browser: BrowserOptions,
    pub layout: SiteLayout,
    pub field_map: FieldMap,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://bcres.paragonrels.com/ParagonLS/publink/view.mvc".to_string(),
            guid: "43125b63-6c9a-457f-a8a5-725d467dc1f9".to_string(),
            request_delay_secs: 0.3,
            output_path: PathBuf::from("house_price.csv"),
            placeholder: "N/A".to_string(),
            browser: BrowserOptions::default(),
            layout: SiteLayout::default(),
            field_map: FieldMap::default(),
        }
    }
}

impl ScrapeConfig {
    /// Read a JSON config file. Keys that are absent keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| ScrapeError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.base_url.trim().is_empty() {
            return Err(ScrapeError::Config("base_url is empty".into()));
        }
        if self.guid.trim().is_empty() {
            return Err(ScrapeError::Config("guid is empty".into()));
        }
        if self.layout.row_stride == 0 {
            return Err(ScrapeError::Config("layout.row_stride must be positive".into()));
        }
        self.request_delay()?;
        if self.field_map.is_empty() {
            return Err(ScrapeError::Config("field_map has no entries".into()));
        }
        Ok(())
    }

    /// Pause after each detail request. Negative, NaN or out-of-range
    /// values are rejected.
    pub fn request_delay(&self) -> Result<Duration, ScrapeError> {
        Duration::try_from_secs_f64(self.request_delay_secs).map_err(|e| {
            ScrapeError::Config(format!(
                "request_delay_secs {} is not a usable delay: {e}",
                self.request_delay_secs
            ))
        })
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Entry page holding the listing frameset
    pub fn index_url(&self) -> String {
        format!("{}/?GUID={}", self.base(), self.guid)
    }

    /// HTML detail report for one listing
    pub fn detail_url(&self, id: &ListingIdentifier) -> String {
        let report = &self.layout.report;
        format!(
            "{}/Report?outputtype=HTML&GUID={}&ListingID={}&Report=Yes&view={}&layout_id={}&screenWidth={}",
            self.base(),
            self.guid,
            id,
            report.view,
            report.layout_id,
            report.screen_width,
        )
    }
}

/// Browser launch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    /// Chrome/Chromium binary; autodetected when unset
    pub executable_path: Option<PathBuf>,
    pub headless: bool,
    /// Wait after navigation so the frameset can load its frames
    pub settle_secs: u64,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            executable_path: None,
            headless: true,
            settle_secs: 3,
        }
    }
}

/// Where things live on the report site.
///
/// Every structural assumption about the target pages is kept here so a
/// layout change on the site is a data edit. Bump `version` when editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteLayout {
    pub version: String,
    /// XPath of the frame holding the listing table
    pub frame_xpath: String,
    /// First `tr` (0-based, document order) that carries a listing
    pub row_start: usize,
    /// Distance between listing rows
    pub row_stride: usize,
    /// Characters of the onclick handler before the identifier
    pub onclick_prefix_len: usize,
    /// Row label in the first listing's onclick suffix (`'Row3'`)
    pub row_label_start: u32,
    /// Increment of the row label per listing
    pub row_label_step: u32,
    /// `id` of the detail report container
    pub container_id: String,
    /// Attribute holding each field's positional index
    pub field_attribute: String,
    pub report: ReportParams,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            version: "publink-v1".to_string(),
            frame_xpath: "/html/frameset/frameset/frame".to_string(),
            row_start: 3,
            row_stride: 3,
            onclick_prefix_len: 12,
            row_label_start: 3,
            row_label_step: 4,
            container_id: "divHtmlReport".to_string(),
            field_attribute: "tabindex".to_string(),
            report: ReportParams::default(),
        }
    }
}

/// Fixed query parameters of the detail report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportParams {
    pub view: u32,
    pub layout_id: u32,
    pub screen_width: u32,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            view: 29,
            layout_id: 63,
            screen_width: 1162,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_url_matches_report_template() {
        let config = ScrapeConfig {
            base_url: "https://reports.example/publink/view.mvc/".into(),
            guid: "abc-123".into(),
            ..Default::default()
        };

        let url = config.detail_url(&ListingIdentifier::new("262"));
        assert_eq!(
            url,
            "https://reports.example/publink/view.mvc/Report?outputtype=HTML&GUID=abc-123&ListingID=262&Report=Yes&view=29&layout_id=63&screenWidth=1162"
        );
        assert_eq!(url, config.detail_url(&ListingIdentifier::new("262")));
    }

    #[test]
    fn index_url_carries_guid() {
        let config = ScrapeConfig {
            base_url: "https://reports.example/view.mvc".into(),
            guid: "g".into(),
            ..Default::default()
        };
        assert_eq!(config.index_url(), "https://reports.example/view.mvc/?GUID=g");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ScrapeConfig = serde_json::from_str(
            r#"{"guid":"xyz","layout":{"row_start":5},"output_path":"out.tsv"}"#,
        )
        .unwrap();

        assert_eq!(config.guid, "xyz");
        assert_eq!(config.layout.row_start, 5);
        assert_eq!(config.layout.row_stride, 3);
        assert_eq!(config.layout.container_id, "divHtmlReport");
        assert_eq!(config.output_path, PathBuf::from("out.tsv"));
        assert_eq!(config.field_map.len(), 22);
    }

    #[test]
    fn validate_rejects_zero_stride() {
        let mut config = ScrapeConfig::default();
        config.layout.row_stride = 0;
        assert!(matches!(config.validate(), Err(ScrapeError::Config(_))));
    }

    #[test]
    fn validate_rejects_unusable_delays() {
        for delay in [-1.0, f64::NAN, f64::INFINITY, 1e20] {
            let config = ScrapeConfig {
                request_delay_secs: delay,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(ScrapeError::Config(_))));
            assert!(config.request_delay().is_err());
        }
    }

    #[test]
    fn request_delay_converts_seconds() {
        let config = ScrapeConfig::default();
        assert_eq!(config.request_delay().unwrap(), Duration::from_millis(300));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scrape_config.json");
        std::fs::write(&path, r#"{"request_delay_secs":0.0}"#).unwrap();

        let config = ScrapeConfig::load(&path).unwrap();
        assert_eq!(config.request_delay_secs, 0.0);
    }
}
