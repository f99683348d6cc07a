//! Record types flowing through the extraction pipeline

use chrono::NaiveDate;

/// Column order of the CSV store
pub const CSV_HEADER: [&str; 11] = [
    "name",
    "link",
    "screen",
    "resolution",
    "os",
    "cpu",
    "gpu",
    "ram",
    "storage",
    "price",
    "date",
];

/// Listing data as scraped from one card, before any filtering
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub name: String,
    /// Absolute URL of the product detail page
    pub link: String,
    pub screen: String,
    pub resolution: String,
    pub os: String,
    pub cpu: String,
    pub gpu: String,
    pub ram: String,
    pub storage: String,
    /// Price exactly as displayed, currency glyphs included
    pub price_text: String,
}

/// A listing that passed every filter, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct LaptopRecord {
    pub name: String,
    pub link: String,
    pub screen: String,
    pub resolution: String,
    pub os: String,
    pub cpu: String,
    pub gpu: String,
    pub ram: String,
    pub storage: String,
    pub price: f64,
    /// Date of the crawl run that captured the listing
    pub date: NaiveDate,
}

impl LaptopRecord {
    /// Builds the final record from a candidate and its parsed price
    pub fn from_candidate(candidate: CandidateRecord, price: f64, date: NaiveDate) -> Self {
        Self {
            name: candidate.name,
            link: candidate.link,
            screen: candidate.screen,
            resolution: candidate.resolution,
            os: candidate.os,
            cpu: candidate.cpu,
            gpu: candidate.gpu,
            ram: candidate.ram,
            storage: candidate.storage,
            price,
            date,
        }
    }

    /// Returns the record as a CSV row in [`CSV_HEADER`] order
    pub fn to_row(&self) -> [String; 11] {
        [
            self.name.clone(),
            self.link.clone(),
            self.screen.clone(),
            self.resolution.clone(),
            self.os.clone(),
            self.cpu.clone(),
            self.gpu.clone(),
            self.ram.clone(),
            self.storage.clone(),
            format!("{:.2}", self.price),
            self.date.format("%Y-%m-%d").to_string(),
        ]
    }
}
