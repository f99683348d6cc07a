//! Crawler module for walking the search results
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching, with the page cache in front of it
//! - Listing card extraction
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{finish_run, run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetched, PageSource};
pub use parser::{
    extract_cards, parse_card, CardError, ListingPage, ListingSelectors, REQUIRED_SPECS,
};
