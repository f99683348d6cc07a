//! Output module for persisting and reporting crawl results
//!
//! This module handles:
//! - Appending accepted listings to the CSV store
//! - Recording and printing per-run statistics

mod csv_sink;
pub mod stats;
mod traits;

pub use csv_sink::{append_records, AppendOutcome};
pub use stats::{print_report, CrawlReport, RejectionCounts};
pub use traits::{OutputError, OutputResult};
