//! Run statistics
//!
//! This module collects what happened during one crawl run and prints it.

use crate::model::LaptopRecord;
use crate::normalize::Rejection;
use crate::state::StopReason;

/// Candidates left out by the filter, by reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionCounts {
    pub unparseable_price: usize,
    pub over_budget: usize,
    pub gpu_mismatch: usize,
    pub cpu_mismatch: usize,
}

impl RejectionCounts {
    pub fn record(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::UnparseablePrice(_) => self.unparseable_price += 1,
            Rejection::OverBudget { .. } => self.over_budget += 1,
            Rejection::GpuMismatch { .. } => self.gpu_mismatch += 1,
            Rejection::CpuMismatch { .. } => self.cpu_mismatch += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.unparseable_price + self.over_budget + self.gpu_mismatch + self.cpu_mismatch
    }
}

/// Outcome of one crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Every accepted record, in crawl order
    pub records: Vec<LaptopRecord>,

    /// Termination signal that ended the run
    pub stop_reason: Option<StopReason>,

    /// Pages downloaded from the site
    pub pages_downloaded: u32,

    /// Pages served from the cache
    pub pages_from_cache: u32,

    /// Listing cards found across all pages
    pub cards_seen: usize,

    /// Cards that could not be parsed
    pub cards_dropped: usize,

    /// Candidates the filter left out
    pub rejections: RejectionCounts,

    /// Rows appended to the CSV file
    pub rows_saved: usize,
}

impl CrawlReport {
    /// Pages that contributed cards (the terminating page is not counted)
    pub fn pages_with_products(&self) -> u32 {
        let visited = self.pages_downloaded + self.pages_from_cache;
        match self.stop_reason {
            Some(StopReason::NoCards { .. }) => visited.saturating_sub(1),
            _ => visited,
        }
    }
}

/// Prints a run report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Statistics ===\n");

    println!("Pages:");
    println!("  Downloaded: {}", report.pages_downloaded);
    println!("  From cache: {}", report.pages_from_cache);
    println!("  With products: {}", report.pages_with_products());
    if let Some(reason) = &report.stop_reason {
        println!("  Stopped: {}", reason);
    }
    println!();

    println!("Listings:");
    println!("  Cards found: {}", report.cards_seen);
    println!("  Unparseable cards: {}", report.cards_dropped);
    println!("  Accepted: {}", report.records.len());
    println!();

    if report.rejections.total() > 0 {
        println!("Rejected ({}):", report.rejections.total());
        println!("  Unparseable price: {}", report.rejections.unparseable_price);
        println!("  Over budget: {}", report.rejections.over_budget);
        println!("  GPU mismatch: {}", report.rejections.gpu_mismatch);
        println!("  CPU mismatch: {}", report.rejections.cpu_mismatch);
        println!();
    }
}
