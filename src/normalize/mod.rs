//! Normalization and filtering of scraped listings
//!
//! This module handles:
//! - Cleaning whitespace in scraped text
//! - Parsing locale-formatted price text into numbers
//! - Applying the GPU, CPU and price criteria

mod filter;
mod price;
mod text;

pub use filter::{normalize_and_filter, FilterCriteria, Rejection};
pub use price::{parse_price, PriceError};
pub use text::clean_fragments;
