//! Crawl state machine
//!
//! A run starts `Running` at page 1 and moves forward one page at a time
//! until a termination signal moves it to `Stopped`. There is no way back.

use std::fmt;

/// Why pagination ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The search request for this page was redirected to the home page
    RedirectedHome { page: u32 },

    /// This page exists but holds no listing cards
    NoCards { page: u32 },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedirectedHome { page } => {
                write!(f, "page {} redirected to the home page", page)
            }
            Self::NoCards { page } => write!(f, "page {} has no products", page),
        }
    }
}

/// Current position of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// Crawling; `page` is the next page to fetch
    Running { page: u32 },

    /// Pagination is over
    Stopped(StopReason),
}

impl CrawlState {
    /// Initial state of every run
    pub fn start() -> Self {
        Self::Running { page: 1 }
    }

    /// The page to fetch next, or None once stopped
    pub fn current_page(&self) -> Option<u32> {
        match self {
            Self::Running { page } => Some(*page),
            Self::Stopped(_) => None,
        }
    }

    /// Moves to the next page. A stopped crawl stays stopped.
    pub fn advance(self) -> Self {
        match self {
            Self::Running { page } => Self::Running {
                page: page.saturating_add(1),
            },
            stopped => stopped,
        }
    }

    /// Ends the crawl. The first stop reason wins.
    pub fn stop(self, reason: StopReason) -> Self {
        match self {
            Self::Running { .. } => Self::Stopped(reason),
            stopped => stopped,
        }
    }
}
