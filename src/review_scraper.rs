#[cfg(feature = "cache")]
use crate::cache::PageCache;
use crate::extractor::ReviewExtractor;
use crate::fetcher::{Fetcher, PageFetcher};
use crate::normalize::{normalize, RecordContext};
use crate::store::ReviewStore;
use crate::utils::product_slug;
use crate::{ReviewRecord, ScrapeError, ScrapeWarning, Site};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Review pages fetched per product URL unless the caller asks otherwise.
pub const DEFAULT_MAX_PAGES: u32 = 2;

/// Minimum spacing between consecutive fetches within one job. The
/// marketplaces rate-limit aggressively; do not lower this against a live
/// site.
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub max_pages: u32,
    pub min_request_interval: Duration,
    /// Soft deadline for one job. When it runs out between pages, the job
    /// stops and returns what it has collected so far.
    pub time_budget: Option<Duration>,
    /// Overrides the product name derived from the URL slug.
    pub product_name: Option<String>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            min_request_interval: DEFAULT_REQUEST_INTERVAL,
            time_budget: None,
            product_name: None,
        }
    }
}

/// One completed (possibly partial) scrape of a product URL.
///
/// Every record's `site` matches the job's resolved site, and `page`
/// numbers run from 1 up to `pages_requested`; pages lost to a fetch or
/// parse failure are absent from `records` and present in `warnings`.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeJob {
    pub input_url: String,
    pub site: Option<Site>,
    pub product: String,
    pub pages_requested: u32,
    pub records: Vec<ReviewRecord>,
    pub warnings: Vec<ScrapeWarning>,
}

impl ScrapeJob {
    fn new(url: &str, product: String, pages_requested: u32) -> Self {
        Self {
            input_url: url.to_string(),
            site: None,
            product,
            pages_requested,
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Consumes the job into a store holding its records.
    pub fn into_store(self) -> ReviewStore {
        let mut store = ReviewStore::new();
        for record in self.records {
            store.append(record);
        }
        store
    }

    fn warn(&mut self, warning: ScrapeWarning) {
        warning.log();
        self.warnings.push(warning);
    }
}

/// Pagination driver: resolves the marketplace for a URL, walks its review
/// pages one at a time, and funnels each page through the matching parser
/// and the normalizer.
#[derive(Clone)]
pub struct ReviewScraper {
    fetcher: Arc<dyn PageFetcher>,
    extractor: ReviewExtractor,
    #[cfg(feature = "cache")]
    cache: PageCache,
}

impl Default for ReviewScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewScraper {
    pub fn new() -> Self {
        Self::new_with_fetcher(Arc::new(Fetcher::new()))
    }

    pub fn new_with_fetcher(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            extractor: ReviewExtractor::new(),
            #[cfg(feature = "cache")]
            cache: PageCache::new(),
        }
    }

    /// Scrapes up to `options.max_pages` review pages of `url`.
    ///
    /// Per-page fetch and parse failures are recorded as warnings on the
    /// returned job and never abort it; an unsupported URL yields an empty
    /// job with a warning. The only synchronous failure is an invalid
    /// `max_pages`, rejected before any fetch.
    pub async fn scrape(
        &self,
        url: &str,
        options: &ScrapeOptions,
    ) -> Result<ScrapeJob, ScrapeError> {
        if options.max_pages == 0 {
            return Err(ScrapeError::InvalidMaxPages(options.max_pages));
        }

        let product = options
            .product_name
            .clone()
            .unwrap_or_else(|| product_slug(url));
        let mut job = ScrapeJob::new(url, product, options.max_pages);

        let Some(site) = Site::classify(url) else {
            job.warn(ScrapeWarning::UnsupportedSite {
                url: url.to_string(),
            });
            return Ok(job);
        };
        job.site = Some(site);

        let product = job.product.clone();
        let started = Instant::now();
        let mut last_fetch: Option<Instant> = None;

        for page in 1..=options.max_pages {
            if let Some(budget) = options.time_budget {
                if started.elapsed() >= budget {
                    job.warn(ScrapeWarning::BudgetExhausted {
                        after_page: page - 1,
                    });
                    break;
                }
            }

            let page_url = site.page_url(url, page);

            #[cfg(feature = "cache")]
            if let Some(cached) = self.cache.get(&page_url) {
                debug!(page_url = %page_url, "using cached records for page");
                job.records.extend(cached);
                continue;
            }

            // One request at a time, spaced out; the throttle belongs to
            // the driver, not the parsers.
            if let Some(previous) = last_fetch {
                let since_last = previous.elapsed();
                if since_last < options.min_request_interval {
                    tokio::time::sleep(options.min_request_interval - since_last).await;
                }
            }
            last_fetch = Some(Instant::now());

            debug!(page, page_url = %page_url, "fetching review page");
            let html = match self.fetcher.fetch_page(&page_url).await {
                Ok(html) => html,
                Err(e) => {
                    job.warn(ScrapeWarning::FetchFailed {
                        page,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let raw_reviews = match self.extractor.parse(site, &html) {
                Ok(raw) => raw,
                Err(e) => {
                    job.warn(ScrapeWarning::ParseFailed {
                        page,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let ctx = RecordContext {
                site,
                product: &product,
                source_url: url,
                page,
            };
            let page_records: Vec<ReviewRecord> = raw_reviews
                .iter()
                .filter_map(|raw| normalize(raw, &ctx))
                .collect();
            debug!(page, count = page_records.len(), "normalized review page");

            #[cfg(feature = "cache")]
            self.cache.set(page_url, page_records.clone());

            job.records.extend(page_records);
        }

        info!(
            url = %url,
            site = %site,
            records = job.records.len(),
            warnings = job.warnings.len(),
            "scrape job finished"
        );
        Ok(job)
    }

    /// Scrapes several product URLs in sequence, merging all records into
    /// one store. The per-URL jobs are returned alongside so callers can
    /// inspect warnings.
    pub async fn scrape_many(
        &self,
        urls: &[&str],
        options: &ScrapeOptions,
    ) -> Result<(ReviewStore, Vec<ScrapeJob>), ScrapeError> {
        let mut combined = ReviewStore::new();
        let mut jobs = Vec::with_capacity(urls.len());

        for url in urls {
            let job = self.scrape(url, options).await?;
            for record in &job.records {
                combined.append(record.clone());
            }
            jobs.push(job);
        }

        Ok((combined, jobs))
    }
}
