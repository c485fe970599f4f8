//! Crawler module for fetching and walking result pages
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - The page loop driving extraction, parsing and deduplication
//! - Politeness delays between pages

mod controller;
mod fetcher;

pub use controller::{CrawlController, CrawlReport, StopReason};
pub use fetcher::{
    build_http_client, default_headers, FetchResponse, HttpFetcher, PageFetcher,
    DEFAULT_USER_AGENT,
};

use crate::config::Config;
use crate::ScrapeError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP fetcher and the default request headers
/// 2. Walk result pages for the configured search
/// 3. Return the collected postings and crawl statistics
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl finished, possibly early on a transport failure
/// * `Err(ScrapeError)` - The fetcher could not be built
pub async fn crawl(config: &Config) -> Result<CrawlReport, ScrapeError> {
    let fetcher = HttpFetcher::new(&config.http)?;
    let controller = CrawlController::from_config(fetcher, config)
        .with_headers(default_headers(&config.http)?);
    controller.crawl(&config.search).await
}
