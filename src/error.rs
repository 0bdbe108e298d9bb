use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("max_pages must be at least 1, got {0}")]
    InvalidMaxPages(u32),

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("failed to parse page content: {0}")]
    Parse(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("suggestion generator failed: {0}")]
    Suggestion(String),
}

impl ScrapeError {
    pub fn log(&self) {
        match self {
            ScrapeError::InvalidMaxPages(given) => {
                warn!(given, "rejected scrape request before any fetch");
            }
            ScrapeError::Fetch { url, reason } => {
                error!(url = %url, reason = %reason, "page fetch failed");
            }
            ScrapeError::UnexpectedStatus { url, status } => {
                error!(url = %url, status, "page fetch returned non-success status");
            }
            ScrapeError::Parse(e) => {
                error!(error = %e, "page content could not be parsed");
            }
            ScrapeError::Http(e) => {
                error!(error = %e, "HTTP client error");
            }
            ScrapeError::Csv(e) => {
                error!(error = %e, "CSV serialization failed");
            }
            ScrapeError::Json(e) => {
                error!(error = %e, "JSON serialization failed");
            }
            ScrapeError::Io(e) => {
                error!(error = %e, "I/O error");
            }
            ScrapeError::Suggestion(e) => {
                error!(error = %e, "suggestion generator failed");
            }
        }
    }
}

/// Non-fatal condition recorded on a [`crate::ScrapeJob`].
///
/// A warning never aborts a job: the affected page or record is skipped and
/// scraping continues with whatever comes next.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ScrapeWarning {
    #[error("unsupported marketplace URL: {url}")]
    UnsupportedSite { url: String },

    #[error("failed to fetch page {page}: {reason}")]
    FetchFailed { page: u32, reason: String },

    #[error("failed to parse page {page}: {reason}")]
    ParseFailed { page: u32, reason: String },

    #[error("time budget exhausted after page {after_page}")]
    BudgetExhausted { after_page: u32 },
}

impl ScrapeWarning {
    pub fn log(&self) {
        match self {
            ScrapeWarning::UnsupportedSite { url } => {
                warn!(url = %url, "URL does not belong to a supported marketplace");
            }
            ScrapeWarning::FetchFailed { page, reason } => {
                warn!(page, reason = %reason, "review page fetch failed, page skipped");
            }
            ScrapeWarning::ParseFailed { page, reason } => {
                warn!(page, reason = %reason, "review page parse failed, page skipped");
            }
            ScrapeWarning::BudgetExhausted { after_page } => {
                warn!(after_page, "time budget exhausted, returning partial job");
            }
        }
    }
}
