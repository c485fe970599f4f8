//! Jobgraph main entry point
//!
//! This is the command-line interface for the Jobgraph job-listing scraper.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use jobgraph::config::{load_config_with_hash, validate, Config};
use jobgraph::crawler::crawl;
use jobgraph::output::{open_sink, print_summary, CrawlSummary};
use jobgraph::url::SearchUrls;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Jobgraph: a polite job-listing scraper
///
/// Jobgraph walks job search result pages, rebuilds listings from the
/// object graph embedded in each page, and writes deduplicated postings as
/// JSON or JSON Lines.
#[derive(Parser, Debug)]
#[command(name = "jobgraph")]
#[command(version = "1.0.0")]
#[command(about = "A polite job-listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Role to search for
    #[arg(short, long)]
    search_term: Option<String>,

    /// Location filter
    #[arg(short, long)]
    location: Option<String>,

    /// Maximum number of postings to return
    #[arg(short = 'n', long)]
    results_wanted: Option<usize>,

    /// Maximum number of result pages to fetch
    #[arg(long)]
    max_pages: Option<u32>,

    /// Write postings to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config)
    } else {
        handle_crawl(&config, config_hash, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("jobgraph=info,warn"),
            1 => EnvFilter::new("jobgraph=debug,info"),
            2 => EnvFilter::new("jobgraph=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout carries postings
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line values take precedence over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(term) = &cli.search_term {
        config.search.term = term.clone();
    }
    if let Some(location) = &cli.location {
        config.search.location = Some(location.clone());
    }
    if let Some(results_wanted) = cli.results_wanted {
        config.search.results_wanted = results_wanted;
    }
    if let Some(max_pages) = cli.max_pages {
        config.search.max_pages = max_pages;
    }
    if let Some(output) = &cli.output {
        config.output.path = Some(output.clone());
    }
}

/// Handles the --dry-run mode: shows the resolved configuration and first URL
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let urls = SearchUrls::new(
        &config.site.base_url,
        &config.search.term,
        config.search.location.as_deref(),
    );
    let first_page = urls
        .page_url(1)
        .context("Failed to build the first result page URL")?;

    println!("=== Jobgraph Dry Run ===\n");

    println!("Search:");
    println!("  Term: {}", config.search.term);
    if let Some(location) = &config.search.location {
        println!("  Location: {}", location);
    }
    println!("  Results wanted: {}", config.search.results_wanted);
    println!("  Max pages: {}", config.search.max_pages);

    println!("\nSite:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  State marker: {}", config.site.state_marker);
    println!("  Listing prefixes: {}", config.site.listing_prefixes.join(", "));

    println!("\nPacing:");
    println!(
        "  Delay between pages: {}-{}ms",
        config.crawler.min_delay_ms, config.crawler.max_delay_ms
    );
    println!(
        "  Timeout: {}s, retries: {}",
        config.http.timeout_secs, config.http.max_retries
    );

    println!("\nOutput:");
    println!(
        "  Destination: {}",
        config.output.path.as_deref().unwrap_or("stdout")
    );
    println!("  Format: {:?}", config.output.format);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start at {}", first_page);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: &Config,
    config_hash: Option<String>,
    quiet: bool,
) -> anyhow::Result<()> {
    let started_at = Utc::now();

    let report = match crawl(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };
    let finished_at = Utc::now();

    if report.stop_reason.is_error() {
        tracing::warn!(
            "Crawl ended early ({}), writing {} postings collected so far",
            report.stop_reason,
            report.postings.len()
        );
    }

    let mut sink = open_sink(&config.output).context("Failed to open output")?;
    sink.write_all(&report.postings)
        .context("Failed to write postings")?;

    if !quiet {
        print_summary(&CrawlSummary::from_report(
            &report,
            &config.search,
            config_hash,
            started_at,
            finished_at,
        ));
    }

    Ok(())
}
