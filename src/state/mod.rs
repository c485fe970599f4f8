//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: The crawl state machine (fetching, parsed, continue, done, error)
//! - `CrawlSession`: Page cursor, accumulated postings and counters for one crawl
//! - `DedupTracker`: Session-scoped set of posting ids already emitted

mod crawl_state;
mod dedup;
mod session;

// Re-export main types
pub use crawl_state::CrawlState;
pub use dedup::DedupTracker;
pub use session::CrawlSession;
