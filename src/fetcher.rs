use crate::ScrapeError;
use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use std::time::Duration;
use tracing::{debug, error};

/// Browser-like user agent. The marketplaces serve reduced or blocked
/// markup to clients that identify as scripts.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) \
    Chrome/121.0.0.0 Safari/537.36 Edg/121.0.0.0";

/// Page-fetch collaborator consumed by the pagination driver.
///
/// The driver only needs "URL in, markup out"; anything satisfying that,
/// including a scripted test double, can stand in for the HTTP client.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches one page, failing with [`ScrapeError::UnexpectedStatus`] on
    /// a non-2xx response or [`ScrapeError::Fetch`] on transport failure.
    async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError>;
}

/// HTTP fetcher over a pooled [`reqwest::Client`].
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

/// Explicit request-session configuration. Shared headers and the redirect
/// policy are threaded in here rather than living in ambient global state.
pub struct FetcherConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub headers: Option<HeaderMap>,
    pub redirect_policy: Option<reqwest::redirect::Policy>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DESKTOP_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            headers: None,
            redirect_policy: None,
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    pub fn new() -> Self {
        debug!("fetcher initialized with default configuration");
        Self::new_with_config(FetcherConfig::default())
            .expect("default fetcher configuration is valid")
    }

    /// Builds a fetcher from an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::Http`] if the underlying client cannot be constructed
    /// (e.g. invalid TLS setup).
    pub fn new_with_config(config: FetcherConfig) -> Result<Self, ScrapeError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .pool_max_idle_per_host(10);

        if let Some(headers) = config.headers {
            builder = builder.default_headers(headers);
        }
        if let Some(redirect_policy) = config.redirect_policy {
            builder = builder.redirect(redirect_policy);
        }

        Ok(Fetcher {
            client: builder.build()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for Fetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        debug!(url = %url, "fetching page");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = %e, url = %url, "failed to send request");
            ScrapeError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(error = %e, url = %url, "failed to read response body");
            ScrapeError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!(url = %url, content_length = body.len(), "fetched page");
        Ok(body)
    }
}
