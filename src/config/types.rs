use serde::{Deserialize, Serialize};

/// Main configuration structure for Jobgraph
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// What to search for and how much of it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    /// Free-text role to search for
    pub term: String,

    /// Optional location filter
    pub location: Option<String>,

    /// Maximum number of postings to return
    pub results_wanted: usize,

    /// Hard ceiling on the number of result pages fetched
    pub max_pages: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            term: "developer".to_string(),
            location: None,
            results_wanted: 15,
            max_pages: 25,
        }
    }
}

/// Description of the target site's page layout and graph conventions
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Scheme and host that page and job URLs are built from
    pub base_url: String,

    /// Prefix prepended to raw listing ids in emitted postings
    pub id_prefix: String,

    /// `id` attribute of the script element holding the embedded state
    pub state_marker: String,

    /// Node key prefixes that mark job listings
    pub listing_prefixes: Vec<String>,

    /// Node key prefixes that mark search result metadata
    pub search_result_prefixes: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wellfound.com".to_string(),
            id_prefix: "wf".to_string(),
            state_marker: "__NEXT_DATA__".to_string(),
            listing_prefixes: vec!["StartupResult:".to_string()],
            search_result_prefixes: vec!["JobSearchResult:".to_string()],
        }
    }
}

/// Crawl pacing
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Lower bound of the pause between result pages (milliseconds)
    pub min_delay_ms: u64,

    /// Upper bound of the pause between result pages (milliseconds)
    pub max_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 3000,
            max_delay_ms: 7000,
        }
    }
}

/// Settings for the HTTP fetcher
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// Overrides the browser-like default user agent
    pub user_agent: Option<String>,

    /// Total request timeout (seconds)
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    pub connect_timeout_secs: u64,

    /// Extra attempts after a 5xx response or timeout
    pub max_retries: u32,

    /// Pause between retry attempts (milliseconds)
    pub retry_delay_ms: u64,

    /// Proxy URL applied to all requests
    pub proxy: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 2,
            retry_delay_ms: 5000,
            proxy: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File to write postings to; stdout when absent
    pub path: Option<String>,

    /// Serialization of the posting list
    pub format: OutputFormat,
}

/// How postings are serialized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON array
    Json,

    /// One JSON object per line
    #[default]
    Jsonl,
}
