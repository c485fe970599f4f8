//! Crawl state definitions
//!
//! A crawl cycles `Fetching → Parsed → Continue → Fetching ...` until it
//! reaches `Done`, or `Error` when a fetch fails at the transport level.

use serde::Serialize;
use std::fmt;

/// Current state of a crawl session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlState {
    /// A result page is being fetched
    Fetching,

    /// The fetched page has been extracted and its postings collected
    Parsed,

    /// Another page will be fetched after the politeness delay
    Continue,

    /// The crawl finished normally
    Done,

    /// The crawl stopped on a transport failure
    Error,
}

impl CrawlState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Fetching, Self::Parsed)
                | (Self::Fetching, Self::Done)
                | (Self::Fetching, Self::Error)
                | (Self::Parsed, Self::Continue)
                | (Self::Parsed, Self::Done)
                | (Self::Continue, Self::Fetching)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Parsed => "parsed",
            Self::Continue => "continue",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CrawlState; 5] = [
        CrawlState::Fetching,
        CrawlState::Parsed,
        CrawlState::Continue,
        CrawlState::Done,
        CrawlState::Error,
    ];

    #[test]
    fn test_is_terminal() {
        assert!(!CrawlState::Fetching.is_terminal());
        assert!(!CrawlState::Parsed.is_terminal());
        assert!(!CrawlState::Continue.is_terminal());
        assert!(CrawlState::Done.is_terminal());
        assert!(CrawlState::Error.is_terminal());
    }

    #[test]
    fn test_happy_cycle() {
        assert!(CrawlState::Fetching.can_transition_to(CrawlState::Parsed));
        assert!(CrawlState::Parsed.can_transition_to(CrawlState::Continue));
        assert!(CrawlState::Continue.can_transition_to(CrawlState::Fetching));
        assert!(CrawlState::Parsed.can_transition_to(CrawlState::Done));
    }

    #[test]
    fn test_terminal_states_have_no_successors() {
        for next in ALL {
            assert!(!CrawlState::Done.can_transition_to(next));
            assert!(!CrawlState::Error.can_transition_to(next));
        }
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!CrawlState::Continue.can_transition_to(CrawlState::Parsed));
        assert!(!CrawlState::Parsed.can_transition_to(CrawlState::Error));
        assert!(!CrawlState::Fetching.can_transition_to(CrawlState::Fetching));
    }

    #[test]
    fn test_display() {
        assert_eq!(CrawlState::Fetching.to_string(), "fetching");
        assert_eq!(CrawlState::Done.to_string(), "done");
    }
}
