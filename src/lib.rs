//! Jobgraph: a polite job-listing scraper for embedded-state pages
//!
//! This crate crawls job search result pages that ship their data as a
//! serialized object graph inside server-rendered HTML, resolves the graph's
//! reference pointers, and turns each listing node into a canonical
//! [`JobPosting`].

pub mod config;
pub mod crawler;
pub mod extract;
pub mod listing;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Jobgraph operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid crawl state transition: {from} -> {to}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised by a page fetcher
///
/// Only transport-level failures are errors; every HTTP status, including
/// 404, comes back as a response.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid request header {name}: {message}")]
    InvalidHeader { name: String, message: String },
}

/// Errors pulling the embedded state out of a page
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No embedded state block with id '{marker}' found")]
    NotFound { marker: String },

    #[error("Embedded state is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Embedded state carries no node mapping")]
    MissingGraph,
}

/// Reasons a single listing node is dropped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("listing {key} has no id")]
    MissingId { key: String },

    #[error("listing {key} has no title")]
    MissingTitle { key: String },

    #[error("listing {key} has neither slugs nor id to build a URL from")]
    MissingUrl { key: String },
}

/// Errors writing crawl output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for Jobgraph operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for embedded state extraction
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlController, CrawlReport, HttpFetcher, PageFetcher, StopReason};
pub use listing::{Compensation, CompensationInterval, JobPosting, JobType, Location};
pub use state::{CrawlSession, CrawlState, DedupTracker};
