//! Fakes for the browser session and HTTP fetcher

use async_trait::async_trait;
use listing_report_scraper::scrapers::{HttpFetcher, NavigableSession};
use listing_report_scraper::ScrapeError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Serves a fixed frame document and records whether it was dropped
#[allow(dead_code)]
pub struct FakeSession {
    pub frame: Option<String>,
    pub opened: Arc<Mutex<Vec<String>>>,
    pub closed: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl FakeSession {
    pub fn new(frame: Option<String>) -> Self {
        Self {
            frame,
            opened: Arc::new(Mutex::new(Vec::new())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl NavigableSession for FakeSession {
    fn open(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn frame_html(&self, xpath: &str) -> Result<String, ScrapeError> {
        self.frame
            .clone()
            .ok_or_else(|| ScrapeError::Structure(format!("no frame at {xpath}")))
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Answers from a url -> body table; unknown urls are a 404
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeFetcher {
    pub pages: HashMap<String, String>,
    pub requested: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl HttpFetcher for FakeFetcher {
    async fn get(&self, url: &str) -> Result<String, ScrapeError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Status {
                url: url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}

/// Index frame with three spacer rows, then listings every third row
#[allow(dead_code)]
pub fn index_frame(ids: &[&str]) -> String {
    let spacer = "<tr><td>&nbsp;</td></tr>";
    let mut html = String::from("<html><body><table>");
    html.push_str(&spacer.repeat(3));
    for (i, id) in ids.iter().enumerate() {
        let label = 3 + 4 * i;
        html.push_str(&format!(
            r##"<tr><td><a href="#" onclick="loadReport('{id}','Row{label}'); return false;">{id}</a></td></tr>"##
        ));
        html.push_str(&spacer.repeat(2));
    }
    html.push_str("</table></body></html>");
    html
}

/// Detail report with one div per (tabindex, text)
#[allow(dead_code)]
pub fn detail_report(fields: &[(u32, &str)]) -> String {
    let mut html = String::from(r#"<html><body><div id="divHtmlReport">"#);
    for (index, text) in fields {
        html.push_str(&format!(r#"<div class="field" tabindex="{index}">{text}</div>"#));
    }
    html.push_str("</div></body></html>");
    html
}
