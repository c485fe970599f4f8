use crate::config::SearchConfig;
use crate::listing::JobPosting;
use crate::state::{CrawlState, DedupTracker};
use crate::ScrapeError;

/// Mutable state of one crawl
///
/// Created per search, owned by the controller running it, and consumed
/// when the crawl returns. Nothing here outlives the session.
#[derive(Debug)]
pub struct CrawlSession {
    results_wanted: usize,
    max_pages: u32,

    /// 1-based page cursor
    page: u32,
    state: CrawlState,
    seen: DedupTracker,
    postings: Vec<JobPosting>,

    pages_fetched: u32,
    duplicates_skipped: usize,
    listings_skipped: usize,
}

impl CrawlSession {
    /// Starts a session at page 1 in the `Fetching` state
    pub fn new(search: &SearchConfig) -> Self {
        Self {
            results_wanted: search.results_wanted,
            max_pages: search.max_pages,
            page: 1,
            state: CrawlState::Fetching,
            seen: DedupTracker::new(),
            postings: Vec::new(),
            pages_fetched: 0,
            duplicates_skipped: 0,
            listings_skipped: 0,
        }
    }

    pub fn results_wanted(&self) -> usize {
        self.results_wanted
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub fn duplicates_skipped(&self) -> usize {
        self.duplicates_skipped
    }

    pub fn listings_skipped(&self) -> usize {
        self.listings_skipped
    }

    /// Moves to `next`, rejecting transitions the state machine does not allow
    pub fn transition(&mut self, next: CrawlState) -> Result<(), ScrapeError> {
        if !self.state.can_transition_to(next) {
            return Err(ScrapeError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Counts a page that came back from the fetcher
    pub fn record_fetch(&mut self) {
        self.pages_fetched += 1;
    }

    /// Counts listings that could not be parsed
    pub fn record_skipped_listings(&mut self, count: usize) {
        self.listings_skipped += count;
    }

    /// True once enough postings have been collected
    pub fn is_satisfied(&self) -> bool {
        self.postings.len() >= self.results_wanted
    }

    /// Appends unseen postings in order, stopping as soon as the target is met
    ///
    /// Returns the number of postings added.
    pub fn accept(&mut self, postings: Vec<JobPosting>) -> usize {
        let before = self.postings.len();

        for posting in postings {
            if self.is_satisfied() {
                break;
            }
            if self.seen.insert(&posting.id) {
                self.postings.push(posting);
            } else {
                self.duplicates_skipped += 1;
            }
        }

        self.postings.len() - before
    }

    /// Advances the page cursor by one and returns the new page number
    pub fn advance_page(&mut self) -> u32 {
        self.page += 1;
        self.page
    }

    /// True while the cursor is within the page ceiling
    pub fn within_page_budget(&self) -> bool {
        self.page <= self.max_pages
    }

    /// Ends the session, returning postings capped at the target count
    pub fn into_postings(mut self) -> Vec<JobPosting> {
        self.postings.truncate(self.results_wanted);
        self.postings
    }
}
