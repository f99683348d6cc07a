//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: Running at a page, or stopped
//! - `StopReason`: Which termination signal ended pagination

mod crawl_state;

pub use crawl_state::{CrawlState, StopReason};
