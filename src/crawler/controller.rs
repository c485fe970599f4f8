//! Crawl controller - drives one search across its result pages
//!
//! The controller owns the page loop:
//! - Building each result page URL
//! - Fetching through a [`PageFetcher`]
//! - Extracting, resolving and parsing listings
//! - Deduplicating and accumulating postings
//! - Deciding whether to continue, and pausing between pages

use crate::config::{Config, CrawlerConfig, SearchConfig, SiteConfig};
use crate::crawler::PageFetcher;
use crate::extract::PageExtractor;
use crate::listing::{JobPosting, ListingParser};
use crate::state::{CrawlSession, CrawlState};
use crate::url::SearchUrls;
use crate::ScrapeError;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Why a crawl stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum StopReason {
    /// Enough postings were collected
    ResultsReached,

    /// The page ceiling was reached
    MaxPages,

    /// The page advertised itself as the last one
    LastPage,

    /// The result page does not exist
    NotFound,

    /// Any other non-success HTTP status
    UnexpectedStatus(u16),

    /// The page carried no embedded state or node mapping
    NoStructuredData,

    /// The page yielded no usable listings
    EmptyPage,

    /// The fetch failed below HTTP
    Transport(String),
}

impl StopReason {
    /// Returns true if the crawl ended on a failure rather than a normal stop
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResultsReached => write!(f, "requested number of results reached"),
            Self::MaxPages => write!(f, "page limit reached"),
            Self::LastPage => write!(f, "last result page reached"),
            Self::NotFound => write!(f, "result page not found"),
            Self::UnexpectedStatus(status) => write!(f, "unexpected HTTP status {}", status),
            Self::NoStructuredData => write!(f, "page carried no structured data"),
            Self::EmptyPage => write!(f, "page yielded no listings"),
            Self::Transport(message) => write!(f, "transport failure: {}", message),
        }
    }
}

/// Outcome of one crawl
///
/// Postings are always returned, including those gathered before a failure.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// Unique postings in discovery order, at most `results_wanted` of them
    pub postings: Vec<JobPosting>,
    pub pages_fetched: u32,
    pub listings_skipped: usize,
    pub duplicates_skipped: usize,
    pub final_state: CrawlState,
    pub stop_reason: StopReason,
}

/// Runs searches against one site through a [`PageFetcher`]
pub struct CrawlController<F> {
    fetcher: F,
    base_url: String,
    extractor: PageExtractor,
    parser: ListingParser,
    min_delay_ms: u64,
    max_delay_ms: u64,
    headers: HeaderMap,
}

impl<F: PageFetcher> CrawlController<F> {
    /// Creates a controller for the given site and pacing
    pub fn new(fetcher: F, site: &SiteConfig, crawler: &CrawlerConfig) -> Self {
        Self {
            fetcher,
            base_url: site.base_url.clone(),
            extractor: PageExtractor::from_site(site),
            parser: ListingParser::from_site(site),
            min_delay_ms: crawler.min_delay_ms.min(crawler.max_delay_ms),
            max_delay_ms: crawler.max_delay_ms,
            headers: HeaderMap::new(),
        }
    }

    /// Creates a controller from a full configuration
    pub fn from_config(fetcher: F, config: &Config) -> Self {
        Self::new(fetcher, &config.site, &config.crawler)
    }

    /// Adds headers sent with every page request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls result pages for one search
    ///
    /// Pages are fetched strictly in order, one at a time. The loop stops when
    /// enough postings are collected, the page ceiling or the advertised last
    /// page is reached, or a page comes back missing, unparseable or empty.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Postings gathered so far and why the crawl stopped.
    ///   Transport failures end the crawl here too, with `CrawlState::Error`.
    /// * `Err(ScrapeError)` - The search could not be turned into a URL
    pub async fn crawl(&self, search: &SearchConfig) -> Result<CrawlReport, ScrapeError> {
        let mut session = CrawlSession::new(search);
        let urls = SearchUrls::new(&self.base_url, &search.term, search.location.as_deref());
        let mut previous: Option<Url> = None;

        tracing::info!(
            "Searching '{}'{} for up to {} postings",
            urls.role_slug(),
            urls.location_slug()
                .map(|l| format!(" in '{}'", l))
                .unwrap_or_default(),
            session.results_wanted()
        );

        let stop_reason = loop {
            // Limits are checked before every fetch, including the first
            if session.is_satisfied() {
                session.transition(CrawlState::Done)?;
                break StopReason::ResultsReached;
            }
            if !session.within_page_budget() {
                session.transition(CrawlState::Done)?;
                break StopReason::MaxPages;
            }

            let page = session.page();
            let url = urls.page_url(page)?;
            let headers = self.request_headers(previous.as_ref());

            tracing::debug!("Fetching page {}: {}", page, url);
            let response = match self.fetcher.fetch(url.as_str(), &headers).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!("Fetch of page {} failed: {}", page, e);
                    session.transition(CrawlState::Error)?;
                    break StopReason::Transport(e.to_string());
                }
            };
            session.record_fetch();

            if response.is_not_found() {
                tracing::info!("Page {} not found, stopping", page);
                session.transition(CrawlState::Done)?;
                break StopReason::NotFound;
            }
            if !response.is_success() {
                tracing::warn!("HTTP {} for page {}, stopping", response.status, page);
                session.transition(CrawlState::Done)?;
                break StopReason::UnexpectedStatus(response.status);
            }

            let extracted = match self.extractor.extract(&response.body) {
                Ok(extracted) => extracted,
                Err(e) => {
                    tracing::warn!("No structured data on page {}: {}", page, e);
                    session.transition(CrawlState::Done)?;
                    break StopReason::NoStructuredData;
                }
            };

            let (postings, skipped) = self.parser.parse_all(&extracted.listings);
            session.record_skipped_listings(skipped);
            session.transition(CrawlState::Parsed)?;

            if postings.is_empty() {
                tracing::info!("Page {} yielded no listings, stopping", page);
                session.transition(CrawlState::Done)?;
                break StopReason::EmptyPage;
            }

            let found = postings.len();
            let added = session.accept(postings);
            tracing::info!(
                "Page {}: {} listings, {} new ({} total)",
                page,
                found,
                added,
                session.postings().len()
            );

            if session.is_satisfied() {
                session.transition(CrawlState::Done)?;
                break StopReason::ResultsReached;
            }
            if extracted.page_count.is_some_and(|total| page >= total) {
                tracing::debug!("Page {} is the last advertised page", page);
                session.transition(CrawlState::Done)?;
                break StopReason::LastPage;
            }

            session.advance_page();
            if !session.within_page_budget() {
                session.transition(CrawlState::Done)?;
                break StopReason::MaxPages;
            }

            session.transition(CrawlState::Continue)?;
            self.pause().await;
            session.transition(CrawlState::Fetching)?;
            previous = Some(url);
        };

        tracing::info!(
            "Crawl finished after {} pages with {} postings: {}",
            session.pages_fetched(),
            session.postings().len(),
            stop_reason
        );

        Ok(CrawlReport {
            pages_fetched: session.pages_fetched(),
            listings_skipped: session.listings_skipped(),
            duplicates_skipped: session.duplicates_skipped(),
            final_state: session.state(),
            stop_reason,
            postings: session.into_postings(),
        })
    }

    fn request_headers(&self, referer: Option<&Url>) -> HeaderMap {
        let mut headers = self.headers.clone();
        if let Some(value) = referer.and_then(|url| HeaderValue::from_str(url.as_str()).ok()) {
            headers.insert(REFERER, value);
        }
        headers
    }

    /// Sleeps for a random delay within the configured bounds
    async fn pause(&self) {
        if self.max_delay_ms == 0 {
            return;
        }

        let delay = rand::rng().random_range(self.min_delay_ms..=self.max_delay_ms);
        tracing::debug!("Waiting {}ms before next page", delay);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}
