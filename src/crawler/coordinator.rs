//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop. Starting at page 1 it:
//! - Gets each page from the page source (cache or network)
//! - Extracts listing cards and filters them
//! - Collects accepted records until a termination signal
//!
//! Pages are handled strictly one after another. There is no page cap: the
//! run ends only on a home-page redirect, an empty page, or a fatal error.

use crate::cache::{Clock, FsPageStore, PageStore, SystemClock};
use crate::config::Config;
use crate::crawler::fetcher::{Fetched, PageSource};
use crate::crawler::parser::{extract_cards, ListingPage, ListingSelectors};
use crate::model::LaptopRecord;
use crate::normalize::{normalize_and_filter, FilterCriteria};
use crate::output::{append_records, CrawlReport};
use crate::state::{CrawlState, StopReason};
use crate::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator<S = FsPageStore, C = SystemClock> {
    source: PageSource<S, C>,
    selectors: ListingSelectors,
    criteria: FilterCriteria,
    base_url: Url,
    csv_path: PathBuf,
    flush_each_page: bool,
    run_date: NaiveDate,
    state: CrawlState,
}

impl Coordinator<FsPageStore, SystemClock> {
    /// Creates a coordinator with the on-disk cache and a live HTTP client
    ///
    /// The run date stamped on every accepted record is today's local date.
    pub fn new(config: &Config) -> Result<Self> {
        let source = PageSource::from_config(config)?;
        let run_date = chrono::Local::now().date_naive();
        Self::with_source(config, source, run_date)
    }
}

impl<S: PageStore, C: Clock> Coordinator<S, C> {
    /// Creates a coordinator around an existing page source
    pub fn with_source(
        config: &Config,
        source: PageSource<S, C>,
        run_date: NaiveDate,
    ) -> Result<Self> {
        Ok(Self {
            source,
            selectors: ListingSelectors::from_config(&config.selectors)?,
            criteria: FilterCriteria::from_config(&config.filter),
            base_url: Url::parse(&config.site.base_url)?,
            csv_path: PathBuf::from(&config.output.csv_path),
            flush_each_page: config.output.flush_each_page,
            run_date,
            state: CrawlState::start(),
        })
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Runs the main crawl loop
    ///
    /// With `flush-each-page` enabled, each page's matches are appended to
    /// the CSV file as soon as the page is done, so a fatal error later on
    /// keeps them. Otherwise nothing is written here and the caller saves
    /// `report.records` once the run is over.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Pagination ended on a termination signal
    /// * `Err(ScoutError)` - A request, cache or CSV write failed
    pub async fn run(&mut self) -> Result<CrawlReport> {
        self.state = CrawlState::start();
        let mut report = CrawlReport::default();

        while let Some(page) = self.state.current_page() {
            let html = match self.source.get_or_fetch(page).await? {
                Fetched::RedirectedHome => {
                    tracing::info!("No more pages.");
                    self.state = self.state.stop(StopReason::RedirectedHome { page });
                    continue;
                }
                Fetched::Page { html, from_cache } => {
                    if from_cache {
                        report.pages_from_cache += 1;
                    } else {
                        report.pages_downloaded += 1;
                    }
                    html
                }
            };

            let listing = extract_cards(&html, &self.base_url, &self.selectors);
            if listing.is_empty() {
                tracing::info!("No products on page {}.", page);
                self.state = self.state.stop(StopReason::NoCards { page });
                continue;
            }

            let accepted = self.filter_page(page, listing, &mut report);

            if self.flush_each_page {
                let outcome = append_records(&accepted, &self.csv_path)?;
                report.rows_saved += outcome.rows();
            }

            report.records.extend(accepted);
            self.state = self.state.advance();
        }

        if let CrawlState::Stopped(reason) = self.state {
            tracing::info!("Crawl finished: {}", reason);
            report.stop_reason = Some(reason);
        }

        Ok(report)
    }

    /// Runs every candidate on a page through the filter
    fn filter_page(
        &self,
        page: u32,
        listing: ListingPage,
        report: &mut CrawlReport,
    ) -> Vec<LaptopRecord> {
        report.cards_seen += listing.card_count;
        report.cards_dropped += listing.dropped.len();

        let mut accepted = Vec::new();
        for candidate in listing.candidates {
            let name = candidate.name.clone();
            match normalize_and_filter(candidate, &self.criteria, self.run_date) {
                Ok(record) => accepted.push(record),
                Err(rejection) => {
                    if rejection.is_unparseable() {
                        tracing::warn!("Skipping '{}' on page {}: {}", name, page, rejection);
                    } else {
                        tracing::debug!("Filtered out '{}': {}", name, rejection);
                    }
                    report.rejections.record(&rejection);
                }
            }
        }

        tracing::debug!(
            "Page {}: {} cards, {} unparseable, {} accepted",
            page,
            listing.card_count,
            listing.dropped.len(),
            accepted.len()
        );

        accepted
    }
}

/// Runs a complete crawl and saves the results
///
/// This is the main entry point for a crawl run. It will:
/// 1. Open the page cache and build the HTTP client
/// 2. Walk the search pages until a termination signal
/// 3. Append all accepted records to the CSV file (unless they were
///    already appended page by page)
///
/// # Example
///
/// ```no_run
/// # use laptop_scout::config::load_config;
/// # use laptop_scout::crawler::run_crawl;
/// # use std::path::Path;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("scout.toml"))?;
/// let report = run_crawl(&config).await?;
/// println!("{} laptops saved", report.rows_saved);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport> {
    let mut coordinator = Coordinator::new(config)?;
    let report = coordinator.run().await?;
    finish_run(config, report)
}

/// Saves a finished run's records unless they were flushed page by page
pub fn finish_run(config: &Config, mut report: CrawlReport) -> Result<CrawlReport> {
    if !config.output.flush_each_page {
        let path = PathBuf::from(&config.output.csv_path);
        let outcome = append_records(&report.records, &path)?;
        report.rows_saved = outcome.rows();
    }
    Ok(report)
}
