use serde::{Deserialize, Serialize};
use url::Url;

#[cfg(feature = "cache")]
mod cache;
mod error;
mod extractor;
mod fetcher;
#[cfg(feature = "logging")]
mod logging;
mod normalize;
mod review_scraper;
mod store;
mod suggest;
mod utils;

#[cfg(feature = "cache")]
pub use cache::PageCache;
pub use error::{ScrapeError, ScrapeWarning};
pub use extractor::{RawReview, ReviewExtractor, SNAPDEAL_PINNED_SKIP};
pub use fetcher::{Fetcher, FetcherConfig, PageFetcher, DESKTOP_USER_AGENT};
#[cfg(feature = "logging")]
pub use logging::{log_job_card, setup_logging, LogConfig};
pub use normalize::{normalize, RecordContext};
pub use review_scraper::{
    ReviewScraper, ScrapeJob, ScrapeOptions, DEFAULT_MAX_PAGES, DEFAULT_REQUEST_INTERVAL,
};
pub use store::{ReviewStore, CSV_HEADER, NEGATIVE_RATING_MAX};
pub use suggest::{draft_improvements, SuggestionGenerator};

/// Marketplaces with a dedicated review-page parser.
///
/// The supported set is fixed at build time; adding a site means adding a
/// variant, its page-URL rule, and a parse routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Amazon,
    Flipkart,
    Snapdeal,
}

impl Site {
    /// Maps a product URL to the marketplace it belongs to.
    ///
    /// Matches the hostname case-insensitively against the known site names,
    /// first match wins. Malformed URLs and unknown hosts both yield `None`.
    pub fn classify(url: &str) -> Option<Site> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_ascii_lowercase();

        if host.contains("amazon") {
            Some(Site::Amazon)
        } else if host.contains("flipkart") {
            Some(Site::Flipkart)
        } else if host.contains("snapdeal") {
            Some(Site::Snapdeal)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Site::Amazon => "amazon",
            Site::Flipkart => "flipkart",
            Site::Snapdeal => "snapdeal",
        }
    }

    /// Builds the review-page URL for `page` on this marketplace.
    ///
    /// Each site paginates through a different query parameter; the
    /// separator depends on whether the base URL already carries a query
    /// string.
    pub fn page_url(&self, base: &str, page: u32) -> String {
        let sep = if base.contains('?') { '&' } else { '?' };
        match self {
            // Amazon review listings also want th=1 to pin the default
            // product variant.
            Site::Amazon => match sep {
                '?' => format!("{base}?th=1&pageNumber={page}"),
                _ => format!("{base}&pageNumber={page}"),
            },
            Site::Flipkart => format!("{base}{sep}page={page}"),
            Site::Snapdeal => format!("{base}{sep}page={page}"),
        }
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single normalized product review.
///
/// Immutable once constructed; produced by a marketplace parser plus the
/// normalizer, owned by a [`ReviewStore`] until serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub product: String,
    pub site: Site,
    pub name: String,
    /// 0 to 5; 0 also stands in for a rating the normalizer could not
    /// parse, in which case `rating_unparsed` is set.
    pub rating: u8,
    /// Always present; an empty comment is an empty string, never a missing
    /// field, so the serialized column shape stays stable.
    pub comments: String,
    pub source_url: String,
    pub page: u32,
    #[serde(default)]
    pub rating_unparsed: bool,
}
