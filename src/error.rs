use thiserror::Error;

/// Failures of a scrape run. None of them are recovered from.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("browser session failed while trying to {action}: {message}")]
    Browser { action: String, message: String },

    #[error("unexpected page structure: {0}")]
    Structure(String),

    #[error("failed to create HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not parse listing report: {0}")]
    Parse(String),

    #[error("listing {id} has {found} values but the table has {expected} columns")]
    Table {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to write csv output")]
    Csv(#[from] csv::Error),

    #[error("failed to write spreadsheet output")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to encode json output")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    pub(crate) fn browser(action: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Browser {
            action: action.into(),
            message: format!("{err:#}"),
        }
    }
}
