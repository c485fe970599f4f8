//! HTTP fetcher implementation
//!
//! The crawl controller only sees the [`PageFetcher`] trait. [`HttpFetcher`]
//! is the reqwest-backed implementation and owns everything transport
//! related:
//! - Building HTTP clients with browser-like default headers
//! - Connect and read timeouts
//! - Optional proxy
//! - Retry logic for transient failures

use crate::config::HttpConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Proxy, StatusCode};
use std::time::Duration;

/// Browser user agent sent when the configuration does not override it
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// A fetched page: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND.as_u16()
    }
}

/// Fetches pages for the crawl controller
///
/// Implementations own connection pooling, proxy selection, timeouts and
/// retries. Any HTTP status is a successful fetch; only transport failures
/// are errors.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<FetchResponse, FetchError>;
}

/// Builds the default request headers
///
/// # Arguments
///
/// * `config` - HTTP settings; `user_agent` overrides [`DEFAULT_USER_AGENT`]
pub fn default_headers(config: &HttpConfig) -> Result<HeaderMap, FetchError> {
    let agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(agent).map_err(|e| FetchError::InvalidHeader {
            name: USER_AGENT.to_string(),
            message: e.to_string(),
        })?,
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    Ok(headers)
}

/// Builds an HTTP client with proper configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(FetchError)` - Invalid header or proxy, or TLS backend failure
///
/// # Example
///
/// ```no_run
/// use jobgraph::config::HttpConfig;
/// use jobgraph::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, FetchError> {
    let mut builder = Client::builder()
        .default_headers(default_headers(config)?)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = &config.proxy {
        builder = builder.proxy(Proxy::all(proxy).map_err(FetchError::Client)?);
    }

    builder.build().map_err(FetchError::Client)
}

/// reqwest-backed [`PageFetcher`]
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx / 3xx / 4xx | Returned as-is |
/// | HTTP 5xx | Retry up to `max_retries` times, then returned |
/// | Timeout | Retry up to `max_retries` times, then `FetchError::Transport` |
/// | Other transport error | Immediate `FetchError::Transport` |
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_http_client(config)?,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    async fn fetch_once(
        &self,
        url: &str,
        headers: &HeaderMap,
    ) -> Result<FetchResponse, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, headers: &HeaderMap) -> Result<FetchResponse, FetchError> {
        let mut attempt = 0;

        loop {
            match self.fetch_once(url, headers).await {
                Ok(response) if response.status >= 500 && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "HTTP {} from {}, retry {}/{}",
                        response.status,
                        url,
                        attempt,
                        self.max_retries
                    );
                }
                Ok(response) => return Ok(response),
                Err(e) if e.is_timeout() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Timeout fetching {}, retry {}/{}",
                        url,
                        attempt,
                        self.max_retries
                    );
                }
                Err(source) => {
                    return Err(FetchError::Transport {
                        url: url.to_string(),
                        source: Box::new(source),
                    })
                }
            }

            tokio::time::sleep(self.retry_delay).await;
        }
    }
}
