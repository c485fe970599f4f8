//! Output sink trait and crawl summary types
//!
//! This module defines the trait interface for posting sinks and the
//! summary record printed after a crawl.

use crate::config::SearchConfig;
use crate::crawler::{CrawlReport, StopReason};
use crate::listing::JobPosting;
use crate::state::CrawlState;
use crate::OutputResult;
use chrono::{DateTime, Utc};

/// Summary statistics for a crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    // Run metadata
    pub search_term: String,
    pub location: Option<String>,
    pub config_hash: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    // Counters
    pub pages_fetched: u32,
    pub postings_written: usize,
    pub listings_skipped: usize,
    pub duplicates_skipped: usize,

    // Outcome
    pub final_state: CrawlState,
    pub stop_reason: StopReason,
}

impl CrawlSummary {
    /// Builds a summary from a finished crawl
    pub fn from_report(
        report: &CrawlReport,
        search: &SearchConfig,
        config_hash: Option<String>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            search_term: search.term.clone(),
            location: search.location.clone(),
            config_hash,
            started_at,
            finished_at,
            pages_fetched: report.pages_fetched,
            postings_written: report.postings.len(),
            listings_skipped: report.listings_skipped,
            duplicates_skipped: report.duplicates_skipped,
            final_state: report.final_state,
            stop_reason: report.stop_reason.clone(),
        }
    }

    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds().max(0)
    }

    /// Average postings per fetched page
    pub fn postings_per_page(&self) -> f64 {
        if self.pages_fetched == 0 {
            return 0.0;
        }
        self.postings_written as f64 / self.pages_fetched as f64
    }
}

/// Destination for crawled postings
///
/// Postings arrive in discovery order. `finish` must be called once after the
/// last posting so that framing is closed and buffers are flushed.
pub trait OutputSink {
    /// Writes a single posting
    fn write_posting(&mut self, posting: &JobPosting) -> OutputResult<()>;

    /// Closes the output
    fn finish(&mut self) -> OutputResult<()>;

    /// Writes every posting and closes the output
    ///
    /// Returns the number of postings written.
    fn write_all(&mut self, postings: &[JobPosting]) -> OutputResult<usize> {
        for posting in postings {
            self.write_posting(posting)?;
        }
        self.finish()?;
        Ok(postings.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn report(postings: usize, pages_fetched: u32) -> CrawlReport {
        let posting = JobPosting {
            id: "wf-1".to_string(),
            title: "Engineer".to_string(),
            company_name: None,
            company_url: None,
            company_logo: None,
            company_size: None,
            job_url: "https://wellfound.com/jobs?id=1".to_string(),
            location: None,
            compensation: None,
            job_types: vec![],
            date_posted: None,
            is_remote: None,
            description: None,
            emails: vec![],
        };

        CrawlReport {
            postings: vec![posting; postings],
            pages_fetched,
            listings_skipped: 2,
            duplicates_skipped: 1,
            final_state: CrawlState::Done,
            stop_reason: StopReason::ResultsReached,
        }
    }

    #[test]
    fn test_summary_from_report() {
        let started = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let finished = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 42).unwrap();

        let summary = CrawlSummary::from_report(
            &report(6, 3),
            &SearchConfig::default(),
            Some("abc123".to_string()),
            started,
            finished,
        );

        assert_eq!(summary.search_term, "developer");
        assert_eq!(summary.postings_written, 6);
        assert_eq!(summary.listings_skipped, 2);
        assert_eq!(summary.duration_seconds(), 42);
        assert!((summary.postings_per_page() - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_postings_per_page_without_fetches() {
        let now = Utc::now();
        let summary =
            CrawlSummary::from_report(&report(0, 0), &SearchConfig::default(), None, now, now);
        assert_eq!(summary.postings_per_page(), 0.0);
    }
}
