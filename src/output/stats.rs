//! Crawl summary rendering
//!
//! Summaries go to stderr so that postings written to stdout stay
//! machine-readable.

use crate::output::traits::CrawlSummary;

/// Formats a crawl summary as a human-readable block
pub fn format_summary(summary: &CrawlSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");

    out.push_str("Search:\n");
    out.push_str(&format!("  Term: {}\n", summary.search_term));
    if let Some(location) = &summary.location {
        out.push_str(&format!("  Location: {}\n", location));
    }
    if let Some(hash) = &summary.config_hash {
        out.push_str(&format!("  Config hash: {}\n", hash));
    }
    out.push('\n');

    out.push_str("Run:\n");
    out.push_str(&format!("  Started: {}\n", summary.started_at.to_rfc3339()));
    out.push_str(&format!("  Finished: {}\n", summary.finished_at.to_rfc3339()));
    out.push_str(&format!("  Duration: {}s\n", summary.duration_seconds()));
    out.push_str(&format!(
        "  Final state: {} ({})\n",
        summary.final_state, summary.stop_reason
    ));
    out.push('\n');

    out.push_str("Results:\n");
    out.push_str(&format!("  Pages fetched: {}\n", summary.pages_fetched));
    out.push_str(&format!(
        "  Postings written: {} ({:.1} per page)\n",
        summary.postings_written,
        summary.postings_per_page()
    ));
    out.push_str(&format!(
        "  Duplicates skipped: {}\n",
        summary.duplicates_skipped
    ));
    out.push_str(&format!(
        "  Unparseable listings: {}\n",
        summary.listings_skipped
    ));

    out
}

/// Prints a crawl summary to stderr
pub fn print_summary(summary: &CrawlSummary) {
    eprintln!("{}", format_summary(summary));
}
